// Everything but the entry point lives in the library crate.
#![allow(unused_crate_dependencies)]

use ecoflow_lca::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
