pub mod checklists;
pub mod health;
