pub mod a001_cargo_order;
pub mod a002_insurance_policy;
pub mod a003_return_case;
pub mod common;
