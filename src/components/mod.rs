//! UI components.

pub mod agent_node;
