//! The component host.
//!
//! A [`ComponentHost`] orchestrates the loader and resolver, mounts the
//! resolved component's root node under a mount point, feeds it input sets,
//! and owns the teardown of the whole chain. One host serves one component
//! identifier for its whole life: `Idle → Loading → Mounted → Destroyed`, with
//! `LoadFailed` terminal on any loading failure. Re-targeting a host at a new
//! identifier is not supported; construct a new host instead.
//!
//! The host is a clonable handle. The owner typically spawns
//! [`load`]( ComponentHost::load ) on the local executor and keeps a clone for
//! [`set_inputs`]( ComponentHost::set_inputs ) and
//! [`destroy`]( ComponentHost::destroy ).

use std::cell::RefCell ;
use std::collections::HashMap ;
use std::rc::Rc ;

use futures::channel::oneshot ;
use futures::task::LocalSpawn ;
use thiserror::Error ;
use tracing::{ debug, warn };

use crate::bundle::BundleRef ;
use crate::component::ComponentInstance ;
use crate::input::{ Input, InputBindings };
use crate::loader::{ LoadError, ModuleLoader };
use crate::module::ModuleInstance ;
use crate::resolver::{ resolve, ResolveError };
use crate::value::Value ;
use crate::view::{ MountPoint, NodeHandle, RenderScheduler };

/// Errors surfaced to the host's owner.
///
/// Every loading-state failure is wrapped with the attempted identifier and is
/// fatal for this host instance: nothing is retried, nothing mounts partially.
/// The owner must discard the host and, if desired, construct a new one.
#[derive( Error, Debug )]
pub enum HostError {
	/// The configured component identifier has no `#` separator. Detected
	/// before any loading begins.
	#[error( "Component identifier {0:?} has no '#' separator" )] MissingSeparator( String ),
	/// A second `load` was issued on a host that already started.
	#[error( "Host has already started loading" )] AlreadyStarted,
	/// The module loader failed.
	#[error( "Error loading {identifier}: {source}" )] Load { identifier: String, #[source] source: LoadError },
	/// The component resolver failed. The orphaned module instance was
	/// destroyed before this error propagated.
	#[error( "Error loading {identifier}: {source}" )] Resolve { identifier: String, #[source] source: ResolveError },
}

/// Lifecycle state of a [`ComponentHost`].
#[derive( Copy, Clone, Debug, Eq, PartialEq )]
pub enum HostState {
	/// Constructed, not yet loading.
	Idle,
	/// Loader/resolver in flight.
	Loading,
	/// Component mounted; accepts input updates.
	Mounted,
	/// Loading failed; terminal.
	LoadFailed,
	/// Torn down; terminal.
	Destroyed,
}

/// Configuration for one component host.
pub struct HostConfig {
	bundle: BundleRef,
	/// Component identifier, `"<ModuleExportName>#<ComponentSelector>"`
	component: String,
	inputs: HashMap<String, Input>,
	unwrap_streams: bool,
}

impl HostConfig {
	/// Creates a configuration for mounting `component` (in the
	/// `"Module#selector"` format) out of `bundle`.
	pub fn new( bundle: BundleRef, component: impl Into<String> ) -> Self {
		Self {
			bundle,
			component: component.into(),
			inputs: HashMap::new(),
			unwrap_streams: true,
		}
	}

	/// Sets the initial input set, applied in full at mount time.
	pub fn with_inputs( mut self, inputs: HashMap<String, Input> ) -> Self {
		self.inputs = inputs ;
		self
	}

	/// Enables or disables stream unwrapping (enabled by default). When
	/// enabled, streaming inputs are subscribed to and their emissions are
	/// assigned to the property, the way an async pipe would.
	pub fn with_unwrap_streams( mut self, unwrap_streams: bool ) -> Self {
		self.unwrap_streams = unwrap_streams ;
		self
	}

	/// The configured component identifier.
	#[inline] pub fn component( &self ) -> &str { &self.component }
}

impl std::fmt::Debug for HostConfig {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "HostConfig" )
			.field( "bundle", &self.bundle )
			.field( "component", &self.component )
			.field( "inputs", &self.inputs )
			.field( "unwrap_streams", &self.unwrap_streams )
			.finish()
	}
}

/// Everything a mounted host owns, destroyed top-down in field order:
/// component first, then its owning module, then the subscriptions.
struct MountRecord {
	module: ModuleInstance,
	component: ComponentInstance,
	root: NodeHandle,
	subscriptions: InputBindings,
}

struct HostInner {
	state: HostState,
	config: HostConfig,
	mounted: Option<MountRecord>,
	/// Last applied input set; the `previous` side of the next diff.
	applied: HashMap<String, Input>,
	/// Pending load-completion signals, drained exactly once at mount.
	loaded: Vec<oneshot::Sender<()>>,
}

/// Hosts one dynamically loaded component. See the [module docs]( self ).
#[derive( Clone )]
pub struct ComponentHost {
	inner: Rc<RefCell<HostInner>>,
	loader: Rc<ModuleLoader>,
	mount: Rc<dyn MountPoint>,
	scheduler: Rc<dyn RenderScheduler>,
	spawner: Rc<dyn LocalSpawn>,
}

impl ComponentHost {

	/// Creates an idle host. Nothing loads until [`load`]( Self::load ) runs.
	pub fn new(
		loader: Rc<ModuleLoader>,
		mount: Rc<dyn MountPoint>,
		scheduler: Rc<dyn RenderScheduler>,
		spawner: Rc<dyn LocalSpawn>,
		config: HostConfig,
	) -> Self {
		Self {
			inner: Rc::new( RefCell::new( HostInner {
				state: HostState::Idle,
				config,
				mounted: None,
				applied: HashMap::new(),
				loaded: Vec::new(),
			})),
			loader,
			mount,
			scheduler,
			spawner,
		}
	}

	/// Current lifecycle state.
	pub fn state( &self ) -> HostState {
		self.inner.borrow().state
	}

	/// A zero-payload signal fired once the component mounts. Requested after
	/// the mount already happened, it fires immediately.
	pub fn loaded( &self ) -> oneshot::Receiver<()> {
		let ( sender, receiver ) = oneshot::channel();
		let mut inner = self.inner.borrow_mut();
		match inner.state {
			HostState::Mounted => { let _ = sender.send( () ); }
			_ => inner.loaded.push( sender ),
		}
		receiver
	}

	/// Number of live input subscriptions on the mounted component.
	pub fn active_subscriptions( &self ) -> usize {
		self.inner.borrow().mounted.as_ref().map_or( 0, | record | record.subscriptions.len() )
	}

	/// Reads a property back from the mounted component.
	pub fn property( &self, name: &str ) -> Option<Value> {
		self.inner.borrow().mounted.as_ref().and_then(| record | record.component.property( name ))
	}

	/// Loads the configured bundle, resolves the configured component, and
	/// mounts it: `Idle → Loading → Mounted`.
	///
	/// If the host is destroyed while the load is in flight, the eventual
	/// resolution skips mounting and completes with `Ok(())` - nothing is
	/// appended and no subscription survives.
	///
	/// # Errors
	/// [`HostError::MissingSeparator`] for a malformed identifier (before any
	/// loading), [`HostError::AlreadyStarted`] for a second call, and
	/// [`HostError::Load`] / [`HostError::Resolve`] for loading-state failures,
	/// each wrapped with the attempted identifier. All are fatal: the host ends
	/// in `LoadFailed` and must be discarded.
	pub async fn load( &self ) -> Result<(), HostError> {
		{
			let mut inner = self.inner.borrow_mut();
			match inner.state {
				HostState::Idle => inner.state = HostState::Loading,
				// Destroyed before it ever started: teardown already won.
				HostState::Destroyed => return Ok( () ),
				_ => return Err( HostError::AlreadyStarted ),
			}
		}

		let identifier = self.inner.borrow().config.component.clone();
		let Some(( module_name, selector )) = identifier.split_once( '#' ) else {
			return self.fail( HostError::MissingSeparator( identifier.clone() ));
		};
		let ( module_name, selector ) = ( module_name.to_string(), selector.to_string() );

		debug!( %identifier, "loading component bundle" );
		let bundle = self.inner.borrow().config.bundle.clone();
		let factory = match self.loader.load( &bundle, &module_name ).await {
			Ok( factory ) => factory,
			Err( source ) => return self.fail( HostError::Load { identifier, source }),
		};

		// The load has no cancellation; a host destroyed mid-flight must not
		// mount into a disposed view.
		if self.inner.borrow().state == HostState::Destroyed {
			warn!( %identifier, "host destroyed while loading; skipping mount" );
			return Ok( () );
		}

		let mut module = factory.create();
		let component_factory = match resolve( &module, &selector ) {
			Ok( factory ) => factory.clone(),
			Err( source ) => {
				// The module instance is orphaned; destroy it before propagating.
				module.destroy();
				return self.fail( HostError::Resolve { identifier, source });
			}
		};

		let component = component_factory.create();
		let root = component.root();
		self.mount.append( &root );

		let mut record = MountRecord {
			module,
			component,
			root,
			subscriptions: InputBindings::default(),
		};
		let next = self.inner.borrow().config.inputs.clone();
		let unwrap_streams = self.inner.borrow().config.unwrap_streams ;
		self.apply_to_record( &mut record, &next, &HashMap::new(), unwrap_streams );

		let mut inner = self.inner.borrow_mut();
		inner.mounted = Some( record );
		inner.applied = next ;
		inner.state = HostState::Mounted ;
		for sender in inner.loaded.drain( .. ) {
			let _ = sender.send( () );
		}
		debug!( %identifier, "component mounted" );
		Ok( () )
	}

	/// Replaces the host's input set.
	///
	/// Before the mount completes, the set is stored and read once at mount
	/// time. After the mount, changed keys (by identity) are applied
	/// immediately and synchronously. After teardown or a load failure, the
	/// call is ignored.
	pub fn set_inputs( &self, next: HashMap<String, Input> ) {
		let state = self.inner.borrow().state ;
		match state {
			HostState::Idle | HostState::Loading => {
				self.inner.borrow_mut().config.inputs = next ;
			}
			HostState::Mounted => {
				let Some( mut record ) = self.inner.borrow_mut().mounted.take() else { return };
				let previous = self.inner.borrow().applied.clone();
				let unwrap_streams = self.inner.borrow().config.unwrap_streams ;
				self.apply_to_record( &mut record, &next, &previous, unwrap_streams );
				let mut inner = self.inner.borrow_mut();
				inner.mounted = Some( record );
				inner.applied = next ;
			}
			HostState::LoadFailed | HostState::Destroyed => {}
		}
	}

	/// Tears the host down. Idempotent: a no-op when never mounted or already
	/// destroyed. If mounted, destroys the component instance, removes its root
	/// node, destroys the owning module instance, then cancels every live input
	/// subscription - in that order. If still loading, flags the in-flight load
	/// to skip mounting.
	pub fn destroy( &self ) {
		let record = {
			let mut inner = self.inner.borrow_mut();
			if inner.state == HostState::Destroyed { return }
			inner.state = HostState::Destroyed ;
			inner.mounted.take()
		};
		let Some( mut record ) = record else { return };
		record.component.destroy();
		self.mount.remove( &record.root );
		record.module.destroy();
		record.subscriptions.cancel_all();
	}

	/// Marks the load failed unless teardown already won the race.
	fn fail( &self, error: HostError ) -> Result<(), HostError> {
		let mut inner = self.inner.borrow_mut();
		if inner.state == HostState::Loading {
			inner.state = HostState::LoadFailed ;
		}
		Err( error )
	}

	/// Applies an input diff to a mount record. Keys whose value is
	/// identity-equal to the previous one are skipped; everything else cancels
	/// any prior subscription first, then assigns or subscribes. One re-render
	/// is requested unconditionally afterwards, covering nested mutation that
	/// never replaced a key.
	fn apply_to_record(
		&self,
		record: &mut MountRecord,
		next: &HashMap<String, Input>,
		previous: &HashMap<String, Input>,
		unwrap_streams: bool,
	) {
		for ( name, input ) in next {
			if previous.get( name ).is_some_and(| prior | Input::same_identity( prior, input )) {
				continue ;
			}
			record.subscriptions.cancel( name );
			match input {
				Input::Value( value ) => record.component.set_property( name, ( **value ).clone() ),
				Input::Stream( source ) if unwrap_streams => {
					// Parity with an async pipe, which is null until the first emission.
					record.component.set_property( name, Value::Null );
					record.subscriptions.subscribe(
						name,
						source,
						record.component.shared(),
						Rc::clone( &self.scheduler ),
						&self.spawner,
					);
				}
				// The raw source has no property-bag representation; the
				// property keeps its prior value.
				Input::Stream( _ ) => {}
			}
		}
		// A key dropped from the set keeps its last value but must stop
		// receiving writes.
		for name in previous.keys() {
			if !next.contains_key( name ) {
				record.subscriptions.cancel( name );
			}
		}
		self.scheduler.request_render();
	}

}

impl std::fmt::Debug for ComponentHost {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		let inner = self.inner.borrow();
		f.debug_struct( "ComponentHost" )
			.field( "state", &inner.state )
			.field( "component", &inner.config.component )
			.field( "loader", &self.loader )
			.finish_non_exhaustive()
	}
}
