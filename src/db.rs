pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod reservation_repo;
pub use reservation_repo::ReservationRepository;
pub mod profile_repo;
pub use profile_repo::ProfileRepository;
