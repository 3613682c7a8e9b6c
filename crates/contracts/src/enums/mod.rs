pub mod ledger_entry_type;
pub mod liable_party;
pub mod return_status;
pub mod return_type;
pub mod shipment_leg;

pub use ledger_entry_type::LedgerEntryType;
pub use liable_party::LiableParty;
pub use return_status::ReturnStatus;
pub use return_type::ReturnType;
pub use shipment_leg::ShipmentLeg;
