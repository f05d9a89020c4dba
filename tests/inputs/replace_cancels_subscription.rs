use std::collections::HashMap ;

use bundle_link::{ BundleRef, Input, Value };

use crate::fixtures::{ aot_lazy_loader, build_host, channel_source, DestroyCounters };

/// Replacing a stream-bound input with a plain value cancels the prior
/// subscription before assigning: no further emissions are observed.
#[test]
fn replacing_a_stream_input_cancels_its_subscription() {

	let counters = DestroyCounters::default();
	let loader = aot_lazy_loader( &counters );
	let ( feed, color ) = channel_source();
	let ( mut pool, _body, _redraw, host ) = build_host(
		loader,
		BundleRef::ahead_of_time( "lazy.module" ),
		"LazyModule#lz-lazy",
		HashMap::from([( "color".to_string(), Input::stream( color )) ]),
	);

	if let Err( err ) = pool.run_until( host.load() ) {
		panic!( "{}", err );
	}
	feed.unbounded_send( Value::from( "#000" )).expect( "subscriber gone" );
	pool.run_until_stalled();
	assert_eq!( host.property( "color" ), Some( Value::from( "#000" )));

	host.set_inputs( HashMap::from([( "color".to_string(), Input::value( "#fff" )) ]));
	assert_eq!( host.active_subscriptions(), 0 );
	assert_eq!( host.property( "color" ), Some( Value::from( "#fff" )));

	// A late emission on the cancelled source must not reach the property.
	let _ = feed.unbounded_send( Value::from( "#f00" ));
	pool.run_until_stalled();
	assert_eq!( host.property( "color" ), Some( Value::from( "#fff" )));

}
