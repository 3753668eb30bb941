//! Domain layer: the generic record-list controller plus one service per
//! record domain, each an instance of the same load/persist/mutate/view
//! pattern over its own store key.

pub mod breeding_service;
pub mod dry_off_service;
pub mod milk_sale_service;
pub mod pregnancy_service;
pub mod record_list;
pub mod records;
pub mod shed_service;
pub mod vaccine_service;

pub use breeding_service::BreedingService;
pub use dry_off_service::DryOffService;
pub use milk_sale_service::MilkSaleService;
pub use pregnancy_service::PregnancyService;
pub use shed_service::ShedService;
pub use vaccine_service::VaccineService;
