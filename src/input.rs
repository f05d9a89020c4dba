//! Component inputs and stream subscription bookkeeping.
//!
//! Inputs are either plain values or streaming value sources. Diffing between
//! input sets compares by identity, never by deep equality, mirroring how the
//! host decides whether a key changed.

use std::cell::RefCell ;
use std::collections::HashMap ;
use std::rc::Rc ;

use futures::future::{ AbortHandle, Abortable };
use futures::stream::{ LocalBoxStream, StreamExt };
use futures::task::{ LocalSpawn, LocalSpawnExt };
use tracing::warn ;

use crate::component::Component ;
use crate::value::Value ;
use crate::view::RenderScheduler ;

/// A value supplied to one named input of a mounted component.
#[derive( Clone )]
pub enum Input {
	/// A plain value, assigned to the property directly.
	Value( Rc<Value> ),
	/// A streaming source; with stream-unwrapping enabled, each emission is
	/// assigned to the property.
	Stream( StreamSource ),
}

impl Input {
	/// Wraps a plain value.
	pub fn value( value: impl Into<Value> ) -> Self {
		Self::Value( Rc::new( value.into() ))
	}

	/// Wraps a streaming source.
	pub fn stream( source: StreamSource ) -> Self {
		Self::Stream( source )
	}

	/// Identity comparison: same allocation, not equal content. Differing
	/// variants are always distinct.
	pub(crate) fn same_identity( left: &Self, right: &Self ) -> bool {
		match ( left, right ) {
			( Self::Value( a ), Self::Value( b )) => Rc::ptr_eq( a, b ),
			( Self::Stream( a ), Self::Stream( b )) => StreamSource::ptr_eq( a, b ),
			_ => false,
		}
	}
}

impl std::fmt::Debug for Input {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		match self {
			Self::Value( value ) => f.debug_tuple( "Value" ).field( value ).finish(),
			Self::Stream( _ ) => f.debug_tuple( "Stream" ).field( &"<source>" ).finish(),
		}
	}
}

/// A cold streaming value source: each subscription opens a fresh stream.
///
/// Cloning the handle shares the source; identity is preserved across clones so
/// re-applying the same source to the same input is a no-op.
#[derive( Clone )]
pub struct StreamSource {
	open: Rc<dyn Fn() -> LocalBoxStream<'static, Value>>,
}

impl StreamSource {
	/// Creates a source from a stream-opening closure.
	pub fn new( open: impl Fn() -> LocalBoxStream<'static, Value> + 'static ) -> Self {
		Self { open: Rc::new( open )}
	}

	pub(crate) fn open( &self ) -> LocalBoxStream<'static, Value> {
		( self.open )()
	}

	pub(crate) fn ptr_eq( left: &Self, right: &Self ) -> bool {
		Rc::ptr_eq( &left.open, &right.open )
	}
}

impl std::fmt::Debug for StreamSource {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.write_str( "StreamSource" )
	}
}

/// Live subscriptions keyed by input name. At most one per name: replacing or
/// removing an input cancels the prior subscription before anything else, so a
/// stale write can never race a fresh one.
#[derive( Default )]
pub(crate) struct InputBindings {
	subscriptions: HashMap<String, AbortHandle>,
}

impl InputBindings {

	/// Number of live subscriptions.
	pub(crate) fn len( &self ) -> usize {
		self.subscriptions.len()
	}

	/// Cancels the subscription for `name`, if one is live.
	pub(crate) fn cancel( &mut self, name: &str ) {
		if let Some( handle ) = self.subscriptions.remove( name ) {
			handle.abort();
		}
	}

	/// Cancels every live subscription.
	pub(crate) fn cancel_all( &mut self ) {
		for ( _, handle ) in self.subscriptions.drain() {
			handle.abort();
		}
	}

	/// Opens `source` and spawns a forwarding task: each emission writes the
	/// `name` property on `component` and requests a re-render. The caller must
	/// have cancelled any prior subscription for `name`.
	pub(crate) fn subscribe(
		&mut self,
		name: &str,
		source: &StreamSource,
		component: Rc<RefCell<Box<dyn Component>>>,
		scheduler: Rc<dyn RenderScheduler>,
		spawner: &Rc<dyn LocalSpawn>,
	) {
		debug_assert!( !self.subscriptions.contains_key( name ), "subscription replaced without cancel" );

		let ( handle, registration ) = AbortHandle::new_pair();
		let mut stream = source.open();
		let key = name.to_string();
		let forward = Abortable::new( async move {
			while let Some( value ) = stream.next().await {
				component.borrow_mut().set_property( &key, value );
				scheduler.request_render();
			}
		}, registration );

		if let Err( error ) = spawner.spawn_local( async move { let _ = forward.await; }) {
			warn!( input = name, %error, "failed to spawn input subscription task" );
			return ;
		}
		self.subscriptions.insert( name.to_string(), handle );
	}

}
