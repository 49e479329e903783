pub mod company;
pub mod salary;
