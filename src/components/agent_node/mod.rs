//! Workflow agent node visualization component.
//!
//! Renders a single node of an agent workflow graph on an HTML canvas:
//! - Pure status→presentation mapping via [`presenter::present`]
//! - Exhaustive status/agent-type style tables
//! - Animated progress fill and running pulse glow
//! - Fixed target/source anchor points for edge attachment by the
//!   enclosing graph canvas
//!
//! # Example
//!
//! ```ignore
//! use agent_flow_node::{AgentNodeCanvas, AgentType, NodeData, Status};
//!
//! let data = NodeData {
//!     label: "Draft generator".into(),
//!     agent_type: AgentType::Generator,
//!     status: Status::Running,
//!     progress: Some(37.0),
//!     metrics: None,
//! };
//!
//! view! { <AgentNodeCanvas data=data.into() /> }
//! ```

pub mod animation;
mod component;
pub mod presenter;
mod render;
pub mod theme;
mod types;

pub use component::AgentNodeCanvas;
pub use presenter::{present, VisualDescriptor};
pub use types::{AgentType, Metrics, MetricValue, NodeData, Status};
