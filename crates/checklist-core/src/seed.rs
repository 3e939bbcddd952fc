//! The canonical seed document: the checklist every new session starts from.

use crate::model::{Category, ChecklistDocument, Item, Priority};

pub const SEED_TITLE: &str = "Foundational Customer Experience Check-List";

fn item(
    id: &str,
    title: &str,
    priority: Priority,
    action: &str,
    reason: &str,
    insight: &str,
) -> Item {
    Item {
        id: id.to_string(),
        title: title.to_string(),
        priority,
        action: action.to_string(),
        reason: reason.to_string(),
        insight: insight.to_string(),
        completed: false,
    }
}

fn category(id: &str, title: &str, items: Vec<Item>) -> Category {
    Category {
        id: id.to_string(),
        title: title.to_string(),
        items,
    }
}

/// Build the seed document with every item unchecked.
pub fn default_document() -> ChecklistDocument {
    ChecklistDocument {
        title: SEED_TITLE.to_string(),
        categories: vec![
            category(
                "onboarding",
                "Onboarding",
                vec![
                    item(
                        "onboarding-1",
                        "Define Onboarding Vision & Objectives",
                        Priority::High,
                        "Articulate the vision for the onboarding experience. What is the desired outcome of onboarding? (e.g., rapid time-to-value, high feature adoption, reduced early churn). Define specific, measurable objectives.",
                        "Sets the direction for the onboarding team and ensures alignment with overall CX and business goals.",
                        "Focus on speed and effectiveness. Early positive experiences are crucial for long-term retention. Aim for \"aha!\" moments early in the onboarding process.",
                    ),
                    item(
                        "onboarding-2",
                        "Map the Onboarding Journey",
                        Priority::High,
                        "Detail every step a new customer takes during onboarding, from initial signup to achieving key milestones. Identify potential friction points.",
                        "Visualizing the journey allows for optimization and proactive problem-solving.",
                        "Differentiate onboarding journeys based on customer segments and product complexity. Consider self-service, guided, and high-touch onboarding models.",
                    ),
                    item(
                        "onboarding-3",
                        "Define Onboarding Roles & Responsibilities",
                        Priority::High,
                        "Clearly define roles within the onboarding team (e.g., Onboarding Specialist, Onboarding Manager) and their responsibilities.",
                        "Ensures clear accountability and efficient onboarding processes.",
                        "Onboarding roles often require a blend of technical product knowledge, training skills, and customer empathy.",
                    ),
                    item(
                        "onboarding-4",
                        "Develop Onboarding Processes & Content",
                        Priority::High,
                        "Create standardized onboarding processes, including welcome materials, tutorials, training sessions (live and recorded), knowledge base articles, and proactive check-ins.",
                        "Consistency and quality in onboarding materials lead to better customer understanding and faster adoption.",
                        "Content should be concise, engaging, and tailored to different learning styles. Use a variety of formats (video, text, interactive guides). Iterate based on customer feedback and performance data.",
                    ),
                    item(
                        "onboarding-5",
                        "Choose Onboarding Tools & Technology",
                        Priority::Medium,
                        "Select tools to support onboarding, such as onboarding platforms, CRM integrations, communication tools (email automation, in-app messaging), and analytics dashboards.",
                        "Technology can automate and scale onboarding, track progress, and personalize experiences.",
                        "Choose tools that integrate seamlessly with your existing tech stack. Focus on tools that enable personalized and proactive onboarding.",
                    ),
                    item(
                        "onboarding-6",
                        "Onboarding Metrics & KPIs",
                        Priority::High,
                        "Define specific metrics to measure onboarding success (e.g., Time-to-Value, Feature Adoption Rate, Customer Activation Rate, Early Churn Rate, Onboarding CSAT).",
                        "Metrics provide data-driven insights into onboarding effectiveness and areas for improvement.",
                        "Track leading indicators (e.g., completion rates of onboarding steps) and lagging indicators (e.g., churn rate post-onboarding).",
                    ),
                ],
            ),
            category(
                "csm",
                "Customer Success Management",
                vec![
                    item(
                        "csm-1",
                        "Define CSM Vision & Customer Success Strategy",
                        Priority::High,
                        "Articulate the vision for CSM. What does customer success mean for your company? (e.g., maximizing customer value, driving renewals and upsells, building advocacy). Define a proactive CSM strategy.",
                        "Sets the strategic direction for CSM and ensures alignment with business objectives (retention, growth).",
                        "Customer Success is not just about reactive support; it's about proactively guiding customers to achieve their desired outcomes using your product/service. Focus on building long-term relationships.",
                    ),
                    item(
                        "csm-2",
                        "Define CSM Customer Segmentation & Engagement Model",
                        Priority::High,
                        "Segment your customer base (e.g., by size, industry, product usage, lifecycle stage). Determine the appropriate engagement model for each segment (e.g., high-touch, low-touch, tech-touch).",
                        "Ensures CSM resources are allocated effectively and customers receive the right level of support based on their needs and value.",
                        "Develop a tiered CSM model. Focus high-touch CSM on your most valuable customers. Leverage tech-touch and community for broader customer engagement.",
                    ),
                    item(
                        "csm-3",
                        "Define CSM Roles & Responsibilities",
                        Priority::High,
                        "Clearly define CSM roles (e.g., Customer Success Manager, CSM Team Lead, Onboarding CSM) and their responsibilities, including proactive outreach, health checks, value realization, and expansion opportunities.",
                        "Ensures clear accountability and effective customer engagement.",
                        "CSM roles require a blend of relationship-building skills, product knowledge, business acumen, and project management skills.",
                    ),
                    item(
                        "csm-4",
                        "Develop CSM Processes & Playbooks",
                        Priority::High,
                        "Create standardized CSM processes and playbooks for key activities like onboarding handoffs, regular health checks, QBRs (Quarterly Business Reviews), renewal management, and escalation handling.",
                        "Ensures consistent and proactive customer engagement and maximizes customer lifetime value.",
                        "Playbooks should be living documents, continuously refined based on CSM experience and customer outcomes. Focus on proactive engagement and value demonstration.",
                    ),
                    item(
                        "csm-5",
                        "Choose CSM Tools & Technology",
                        Priority::Medium,
                        "Select tools to support CSM activities, such as CRM, Customer Success platforms, health scoring tools, communication platforms, and analytics dashboards.",
                        "Technology helps CSMs manage customer relationships at scale, track customer health, and automate tasks.",
                        "Choose a CSM platform that integrates with your CRM and other systems. Focus on tools that provide a 360-degree view of the customer and enable proactive engagement.",
                    ),
                    item(
                        "csm-6",
                        "CSM Metrics & KPIs",
                        Priority::High,
                        "Define key metrics to measure CSM success (e.g., Customer Retention Rate, Renewal Rate, Net Revenue Retention (NRR), Customer Lifetime Value (CLTV), Customer Health Score, Expansion Revenue, Customer Advocacy).",
                        "Metrics demonstrate the impact of CSM on business outcomes and guide CSM strategy.",
                        "Focus on outcome-based metrics (NRR, CLTV) that demonstrate the long-term value of CSM. Track leading indicators of churn and expansion (customer health score, product usage).",
                    ),
                ],
            ),
            category(
                "support",
                "Customer Support",
                vec![
                    item(
                        "support-1",
                        "Define Support Vision & Service Standards",
                        Priority::High,
                        "Articulate the vision for customer support. What kind of support experience do you want to provide? (e.g., fast, efficient, empathetic, proactive). Define clear service standards and SLAs (Service Level Agreements).",
                        "Sets expectations for support interactions and ensures consistent service quality.",
                        "Go beyond reactive support. Aim for proactive support by anticipating customer needs and providing helpful resources before they ask.",
                    ),
                    item(
                        "support-2",
                        "Define Support Channels & Coverage",
                        Priority::High,
                        "Determine which support channels you will offer (e.g., email, phone, chat, social media, self-service). Define operating hours and coverage.",
                        "Meeting customers where they are and providing convenient access to support is crucial.",
                        "Consider your target audience's channel preferences and the complexity of your product. Start with core channels and expand as needed. Offer omnichannel experiences where customers can seamlessly switch between channels.",
                    ),
                    item(
                        "support-3",
                        "Define Support Tiers & Escalation Processes",
                        Priority::Medium,
                        "Establish support tiers (e.g., Tier 1, Tier 2, Tier 3) based on complexity and expertise. Define clear escalation paths for complex issues.",
                        "Efficiently routes issues to the appropriate support level and ensures timely resolution.",
                        "Document clear escalation procedures and ensure smooth handoffs between tiers. Empower Tier 1 to resolve as many issues as possible to improve efficiency.",
                    ),
                    item(
                        "support-4",
                        "Develop Support Processes & Knowledge Base",
                        Priority::High,
                        "Create standardized support processes for common issues, develop troubleshooting guides, FAQs, and build a comprehensive knowledge base (internal and customer-facing).",
                        "Streamlines support operations, enables self-service, and reduces resolution times.",
                        "Continuously update the knowledge base based on support tickets and customer feedback. Make it easily searchable and accessible.",
                    ),
                    item(
                        "support-5",
                        "Choose Support Tools & Technology",
                        Priority::High,
                        "Select support tools such as ticketing systems, live chat software, phone systems (VoIP), knowledge base platforms, remote support tools, and CRM integrations.",
                        "Technology is essential for managing support volume, tracking tickets, and providing efficient support.",
                        "Choose a ticketing system that allows for automation, reporting, and integration with other systems. Consider AI-powered tools for automation and self-service (chatbots).",
                    ),
                    item(
                        "support-6",
                        "Support Metrics & KPIs",
                        Priority::High,
                        "Define key metrics to measure support performance (e.g., Customer Satisfaction (CSAT), Customer Effort Score (CES), First Response Time (FRT), Resolution Time, Ticket Volume, Agent Productivity, Cost per Ticket).",
                        "Metrics provide insights into support team performance and areas for optimization.",
                        "Balance efficiency metrics (FRT, Resolution Time) with quality metrics (CSAT, CES). Focus on reducing customer effort and improving first-contact resolution.",
                    ),
                ],
            ),
            category(
                "voc",
                "Voice of the Customer (VOC) Program",
                vec![
                    item(
                        "voc-1",
                        "Define VOC Strategy & Objectives",
                        Priority::High,
                        "Articulate the purpose of your VOC program. What insights are you seeking? How will you use customer feedback? Define clear objectives.",
                        "Provides direction and ensures the VOC program is aligned with business needs.",
                        "VOC should be more than just collecting feedback; it's about understanding customer sentiment, identifying trends, and driving action.",
                    ),
                    item(
                        "voc-2",
                        "Choose VOC Data Collection Methods",
                        Priority::High,
                        "Select a mix of VOC methods (e.g., surveys (NPS, CSAT, CES), customer interviews, focus groups, social listening, feedback forms, review monitoring, support ticket analysis).",
                        "A multi-method approach provides a comprehensive view of customer feedback from various sources.",
                        "Balance quantitative and qualitative data. Actively solicit feedback proactively, not just reactively.",
                    ),
                    item(
                        "voc-3",
                        "Implement VOC Data Analysis & Reporting",
                        Priority::High,
                        "Establish processes for analyzing VOC data, identifying key themes and trends, and creating reports that are actionable for different teams.",
                        "Raw data is useless without analysis and actionable insights.",
                        "Use text analytics and sentiment analysis tools to process large volumes of feedback. Visualize data clearly and tailor reports to specific audiences (product, marketing, support, leadership).",
                    ),
                    item(
                        "voc-4",
                        "Action Planning & Feedback Loop",
                        Priority::High,
                        "Define a process for translating VOC insights into action plans. Establish a feedback loop to communicate changes made based on customer feedback back to customers and internal teams.",
                        "Closing the loop demonstrates that customer feedback is valued and drives continuous improvement.",
                        "Prioritize action items based on impact and feasibility. Track the impact of changes made based on VOC feedback.",
                    ),
                    item(
                        "voc-5",
                        "VOC Tools & Technology",
                        Priority::Medium,
                        "Select tools for VOC data collection, analysis, and reporting (e.g., survey platforms, social listening tools, text analytics software, VOC dashboards).",
                        "Technology streamlines VOC processes and provides efficient data management.",
                        "Integrate VOC tools with your CRM and other systems for a holistic view of the customer.",
                    ),
                ],
            ),
            category(
                "analytics",
                "CX Analytics & Strategy",
                vec![
                    item(
                        "analytics-1",
                        "Define CX Analytics Strategy & Metrics Framework",
                        Priority::High,
                        "Develop a comprehensive CX analytics strategy that aligns with your overall CX vision and business goals. Define a clear framework for measuring and tracking CX metrics across all touchpoints.",
                        "Provides a data-driven foundation for CX improvement and ROI measurement.",
                        "Start with a manageable set of core CX metrics and expand as your analytics capabilities mature. Focus on metrics that are actionable and drive business outcomes.",
                    ),
                    item(
                        "analytics-2",
                        "Implement CX Data Collection & Integration",
                        Priority::High,
                        "Set up systems to collect CX data from various sources (CRM, support tickets, surveys, website analytics, product usage data, etc.). Integrate data into a central repository or dashboard.",
                        "A unified data view provides a holistic understanding of the customer experience.",
                        "Ensure data quality and accuracy. Implement data governance processes.",
                    ),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_valid_and_unchecked() {
        let doc = default_document();
        doc.validate().unwrap();
        assert_eq!(doc.title, SEED_TITLE);
        assert!(doc.items().all(|i| !i.completed));
    }

    #[test]
    fn seed_category_order_is_stable() {
        let ids = default_document()
            .categories
            .iter()
            .map(|c| c.id.clone())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["onboarding", "csm", "support", "voc", "analytics"]);
    }

    #[test]
    fn seed_item_count() {
        assert_eq!(default_document().items().count(), 25);
    }
}
