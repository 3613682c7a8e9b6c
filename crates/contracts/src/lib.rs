//! Общие типы backend-а и его клиентов: агрегаты, DTO и закрытые перечисления.

pub mod dashboards;
pub mod domain;
pub mod enums;
pub mod projections;
pub mod shared;
pub mod system;
