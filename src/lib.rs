//! Core engine for the spiderview directory visualizer: bounded scanning,
//! radial layout, synchronized web/text views, and click-driven navigation.

pub mod config;
pub mod controller;
pub mod error;
pub mod layout;
pub mod scanner;
pub mod shell;
pub mod tree;
pub mod tree_view;
pub mod web_view;
