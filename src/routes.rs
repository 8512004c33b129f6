pub mod index;
pub mod wizard_steps;
pub mod wizard_view;
