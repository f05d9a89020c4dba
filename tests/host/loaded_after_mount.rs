use std::collections::HashMap ;

use bundle_link::BundleRef ;

use crate::fixtures::{ aot_lazy_loader, build_host, DestroyCounters };

/// A loaded signal requested after the mount already happened fires
/// immediately.
#[test]
fn a_late_loaded_request_fires_immediately() {

	let counters = DestroyCounters::default();
	let loader = aot_lazy_loader( &counters );
	let ( mut pool, _body, _redraw, host ) = build_host(
		loader,
		BundleRef::ahead_of_time( "lazy.module" ),
		"LazyModule#lz-lazy",
		HashMap::new(),
	);

	if let Err( err ) = pool.run_until( host.load() ) {
		panic!( "{}", err );
	}

	let mut loaded = host.loaded();
	match loaded.try_recv() {
		Ok( Some( () )) => {}
		value => panic!( "Expected an immediate signal, found: {:#?}", value ),
	}

}
