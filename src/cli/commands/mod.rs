pub mod assign;
pub mod students;
pub mod subjects;
