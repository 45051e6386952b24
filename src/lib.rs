//! # tickflow - Dataflow Program Execution Engine
//!
//! **tickflow** evaluates directed graphs of typed computation nodes (sensors,
//! math/logic/transform operators, generators, timers and relays) over discrete
//! time steps. For every tick it records each node's value, keeps a bounded
//! history of recent values for plotting, and can describe the whole program as
//! formulas and as a graphviz digraph.
//!
//! ## Core Workflow
//!
//! 1.  **Load a Program**: Read a JSON [`ProgramSnapshot`](program::ProgramSnapshot), or implement
//!     [`IntoProgram`](program::IntoProgram) for your own document format.
//! 2.  **Build an Engine**: Use [`Engine::builder`](engine::Engine::builder) to set history capacity,
//!     tick retention and type-name aliases, then load the program through it.
//! 3.  **Tick**: Call [`Engine::advance_tick`](engine::Engine::advance_tick) with an
//!     [`EvalContext`](engine::EvalContext) carrying the current time and device readings.
//! 4.  **Inspect**: Read node values, render formulas with [`FormulaRenderer`](formula::FormulaRenderer),
//!     or produce a description with [`to_graph_description`](graph::to_graph_description).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tickflow::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = Engine::builder().tick_retention(100).build();
//!     let mut program = engine.load(ProgramSnapshot::from_file("program.json")?)?;
//!
//!     let ctx = EvalContext::new(0).with_reading("temperature", 21.5);
//!     let evaluation = engine.advance_tick(&mut program, "tick-1", &ctx)?;
//!     for warning in &evaluation.warnings {
//!         eprintln!("warning: {}", warning);
//!     }
//!
//!     println!("{}", to_graph_description(&program));
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod engine;
pub mod error;
pub mod formula;
pub mod graph;
pub mod nodes;
pub mod port;
pub mod prelude;
pub mod program;
