pub mod bounds;
pub mod comparison;
pub mod comparison_renderer;
pub mod error;
pub mod geo_data_cache;
pub mod in_memory_service;
pub mod inconsistency;
pub mod map_layer_manager;
pub mod map_surface;
pub mod operation;
pub mod overlay;
pub mod point;
pub mod result_presenter;
pub mod route_service;
mod scenario_controller;
pub mod session;
pub mod sidebar;
pub mod step_log;
pub mod trace;
pub mod trace_replayer;
pub mod view_state;

#[cfg(test)]
pub(crate) mod test_utils;
