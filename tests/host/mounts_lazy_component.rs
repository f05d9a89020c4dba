use std::collections::HashMap ;

use bundle_link::{ BundleRef, HostState, Input, Value };

use crate::fixtures::{ aot_lazy_loader, build_host, DestroyCounters };

/// The reference scenario: `"lazy.module"` / `LazyModule#lz-lazy` with
/// `{ name: "Connor" }` mounts one root node and fires the loaded signal once.
#[test]
fn mounts_the_lazy_component_with_its_inputs() {

	let counters = DestroyCounters::default();
	let loader = aot_lazy_loader( &counters );
	let ( mut pool, body, redraw, host ) = build_host(
		loader,
		BundleRef::ahead_of_time( "lazy.module" ),
		"LazyModule#lz-lazy",
		HashMap::from([( "name".to_string(), Input::value( "Connor" )) ]),
	);

	assert_eq!( host.state(), HostState::Idle );
	let mut loaded = host.loaded();

	if let Err( err ) = pool.run_until( host.load() ) {
		panic!( "{}", err );
	}

	assert_eq!( host.state(), HostState::Mounted );
	assert_eq!( body.appended.get(), 1, "exactly one root node appended" );
	assert_eq!( body.children.borrow()[ 0 ].tag(), "lz-lazy" );
	assert_eq!( host.property( "name" ), Some( Value::from( "Connor" )));
	assert!( redraw.requested.get() >= 1 );

	match loaded.try_recv() {
		Ok( Some( () )) => {}
		value => panic!( "Expected the loaded signal to have fired, found: {:#?}", value ),
	}

}
