// Adapters layer: concrete implementations for external systems (storage, chart rendering).

pub mod chart;
pub mod storage;
