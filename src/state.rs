use std::sync::Arc;

use crate::db::store::{ClinicStore, OrchardStore};

#[derive(Clone)]
pub struct ClinicState {
    pub store: SharedClinicStore,
}

#[derive(Clone)]
pub struct OrchardState {
    pub store: SharedOrchardStore,
}

pub type SharedClinicStore = Arc<dyn ClinicStore>;

pub type SharedOrchardStore = Arc<dyn OrchardStore>;
