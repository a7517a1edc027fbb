//! catswipe: a terminal like/dislike card game for random cat images.
//!
//! One batch of cats is fetched from cataas.com, stacked as swipeable cards,
//! and played through to a results screen. The session state machine in
//! [`model::SwipeSession`] owns all game state; [`gesture`] owns drag physics
//! and dismissal animation; [`controller`] wires input and fetching together;
//! [`view`] renders with ratatui.

pub mod controller;
pub mod gesture;
pub mod logging;
pub mod model;
pub mod view;
