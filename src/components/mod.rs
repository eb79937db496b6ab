//! UI Components
//!
//! Reusable Leptos components.

mod box_picker;
mod confirm_button;
mod consumption_editor;
mod inputs_panel;
mod orders_view;
mod production_view;
mod punch_sheet;
mod settings_form;
mod toast;

pub use box_picker::BoxPicker;
pub use confirm_button::DeleteConfirmButton;
pub use consumption_editor::ConsumptionEditor;
pub use inputs_panel::InputsPanel;
pub use orders_view::OrdersView;
pub use production_view::ProductionView;
pub use punch_sheet::PunchSheet;
pub use settings_form::SettingsForm;
pub use toast::NoticeArea;
