//! Render the objects read from a Lisp body as Graphviz.
//!
//! Usage:
//!
//! ```ignore
//! <input.lisp lisp_to_graphviz | dot -T png >output.png
//! ```

use std::io::{Read, Write};

use lisplet::data::Storage;

fn main() -> std::io::Result<()> {
    let mut input = String::new();
    std::io::stdin().lock().read_to_string(&mut input)?;

    let store = Storage::default();
    let body = lisplet::read_body(&store, &input)?;
    let graphviz = lisplet::render_graph(&store, body);

    std::io::stdout().lock().write_all(&graphviz)
}
