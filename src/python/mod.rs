//! Python bindings for the memorama game engine.
//!
//! Lets a Python web front end keep the game logic in Rust and only draw.
//!
//! # Quick Start
//!
//! ```python
//! import memorama
//!
//! game = memorama.MemoryGame(pair_counts=[5, 15, 20], seed=42)
//! game.set_terms("Hola\thttps://ejemplo.com/imagen.png\nMundo\n...")
//! game.build_board()
//!
//! # On every re-render:
//! game.tick()
//! for slot, label, text, image_url, matched in game.tiles():
//!     ...
//! game.flip_slot(3)
//! ```

use pyo3::prelude::*;

mod py_game;

pub use py_game::*;

/// memorama: classroom memory-matching game engine.
#[pymodule]
fn memorama(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMemoryGame>()?;
    m.add_class::<PyStats>()?;
    Ok(())
}
