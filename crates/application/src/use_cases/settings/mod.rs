pub mod load;
pub mod reconcile;
pub mod update;

pub use load::LoadSettingsUseCase;
pub use reconcile::{ReconcileSettingsUseCase, ReconcileSummary};
pub use update::UpdateSettingsUseCase;
