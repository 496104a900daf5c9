//! Client entrypoint: attaches the ambient animations to the host page.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use ambient_canvas::{attach_page_animations, init_logging};

fn main() {
	init_logging();

	attach_page_animations().forget();
}
