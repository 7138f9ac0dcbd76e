pub mod enterprise_panel;
pub mod map_view;
