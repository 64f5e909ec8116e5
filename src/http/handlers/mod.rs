pub mod clinic;
pub mod orchard;

pub use clinic::{
    get_appointments_handler, get_doctor_handler, get_doctors_handler, get_patient_handler,
    get_patients_handler,
};

pub use orchard::{
    create_fruit_handler, edit_fruit_form_handler, edit_fruit_handler, index_handler,
    method_override_handler, new_fruit_handler, remove_fruit_handler, show_fruit_handler,
};
