pub mod aggregation;
pub mod company_service;
pub mod filters;
pub mod reservation_service;
pub mod site_resolver;
pub mod warehouse_service;

pub use company_service::CompanyService;
pub use reservation_service::ReservationService;
pub use warehouse_service::WarehouseService;
