use axum::{Router, routing::get};

use crate::{
    http::handlers::{
        create_fruit_handler, edit_fruit_form_handler, edit_fruit_handler,
        get_appointments_handler, get_doctor_handler, get_doctors_handler, get_patient_handler,
        get_patients_handler, index_handler, method_override_handler, new_fruit_handler,
        remove_fruit_handler, show_fruit_handler,
    },
    state::{ClinicState, OrchardState},
};

pub fn create_clinic_routes(state: ClinicState) -> Router {
    Router::new()
        .route("/patients", get(get_patients_handler))
        .route("/patients/{patient_id}", get(get_patient_handler))
        .route("/doctors", get(get_doctors_handler))
        .route("/doctors/{doctor_id}", get(get_doctor_handler))
        .route("/appointments", get(get_appointments_handler))
        .with_state(state)
}

pub fn create_orchard_routes(state: OrchardState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/fruits", get(index_handler).post(create_fruit_handler))
        .route("/fruits/new", get(new_fruit_handler))
        .route(
            "/fruits/{index}",
            get(show_fruit_handler)
                .put(edit_fruit_handler)
                .delete(remove_fruit_handler)
                .post(method_override_handler),
        )
        .route("/fruits/{index}/edit", get(edit_fruit_form_handler))
        .with_state(state)
}
