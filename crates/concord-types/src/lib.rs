//! Shared type definitions for the Concord diplomacy subsystem.
//!
//! These are the values that cross the boundary between the diplomacy core,
//! the engine, and connected clients. Types flow downstream to `TypeScript`
//! via `ts-rs` for client bindings.
//!
//! # Modules
//!
//! - [`ids`] -- [`EmpireId`] and the [`EmpireId::ALL_EMPIRES`] sentinel
//! - [`enums`] -- Relationship status and message kinds
//! - [`structs`] -- Message and status update payloads

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{DiplomaticMessageType, DiplomaticStatus};
pub use ids::EmpireId;
pub use structs::{DiplomaticMessage, DiplomaticStatusUpdate};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Files are written to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::EmpireId::export_all();
        let _ = crate::enums::DiplomaticStatus::export_all();
        let _ = crate::enums::DiplomaticMessageType::export_all();
        let _ = crate::structs::DiplomaticMessage::export_all();
        let _ = crate::structs::DiplomaticStatusUpdate::export_all();
    }
}
