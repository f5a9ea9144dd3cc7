pub mod errors;
pub mod db;
pub mod filters;
pub mod user;
pub mod student;
pub mod business;
pub mod skill;
pub mod project;
pub mod project_skill;
pub mod student_skill;
pub mod student_project;
pub mod file;

#[cfg(test)]
mod tests;
