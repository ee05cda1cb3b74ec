mod repository;

pub use repository::*;

/// SQL migration for the client registry
pub const MIGRATION_001_CLIENTES: &str = include_str!("migrations/001_clientes.sql");

/// SQL migration for the visit ledger
pub const MIGRATION_002_VISITAS: &str = include_str!("migrations/002_visitas.sql");

/// Index backing the "visits on a date" lookup
pub const MIGRATION_003_VISITAS_FECHA: &str = include_str!("migrations/003_visitas_fecha_index.sql");
