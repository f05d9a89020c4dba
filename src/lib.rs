//! A dynamic component loading runtime for building modular view applications.
//!
//! Ship a small core and defer optional feature bundles until they are actually
//! needed: `bundle_link` resolves a bundle reference plus a module name into a
//! loaded module, looks a component up inside it by its public selector, mounts
//! the component into a live view tree, wires reactive inputs into it, and
//! tears the whole chain down deterministically. Loading works identically
//! whether the bundle was produced ahead of time or compiled just in time.
//!
//! # Core Concepts
//!
//! - [`BundleRef`]: An opaque reference to a module not yet loaded. Either an
//! 	ahead-of-time path hint or the pending namespace of a just-in-time
//! 	import. Pure data; supplied by the caller.
//!
//! - [`ModuleLoader`]: One of two loading strategies behind a single
//! 	asynchronous contract. The ahead-of-time variant delegates to a
//! 	name-based [`ModuleRegistry`]; the just-in-time variant awaits the
//! 	namespace and submits the named export to a [`ModuleCompiler`]. The
//! 	strategy is a deployment-time choice made once, not per call.
//!
//! - [`ModuleFactory`] / [`ModuleInstance`]: The loaded descriptor and its
//! 	instantiated form. An instance owns a registry of [`ComponentFactory`]
//! 	entries keyed by selector and is destroyed exactly once, never while a
//! 	component created from it is still mounted.
//!
//! - [`ComponentHost`]: Orchestrates loader and resolver, appends the
//! 	component's root node under a [`MountPoint`], applies [`Input`] sets
//! 	(subscribing to [`StreamSource`] inputs the way an async pipe would),
//! 	fires a zero-payload loaded signal, and owns teardown.
//!
//! The crate is single-threaded and cooperative: loading and stream
//! subscriptions interleave on one local executor, and the embedding
//! environment supplies the view tree ([`MountPoint`]) and the re-render
//! capability ([`RenderScheduler`]).
//!
//! # Example
//!
//! Mount a lazily imported component, feed it a plain input and a streaming
//! one, and read its properties back:
//!
//! ```
//! use std::collections::HashMap ;
//! use std::rc::Rc ;
//! use std::cell::RefCell ;
//!
//! use futures::executor::LocalPool ;
//! use futures::future::{ FutureExt, LocalBoxFuture };
//! use futures::stream::StreamExt ;
//!
//! use bundle_link::{
//! 	BundleRef, Component, ComponentFactory, ComponentHost, HostConfig, Input,
//! 	LoadError, ModuleCompiler, ModuleFactory, MountPoint, NodeHandle,
//! 	RawModuleDef, RenderScheduler, StreamSource, Value,
//! };
//!
//! // A component is anything with a root node and named properties.
//! struct Label { root: NodeHandle, properties: HashMap<String, Value> }
//!
//! impl Label {
//! 	fn new() -> Box<dyn Component> {
//! 		Box::new( Self { root: NodeHandle::new( "lz-lazy" ), properties: HashMap::new() })
//! 	}
//! }
//!
//! impl Component for Label {
//! 	fn root( &self ) -> NodeHandle { self.root.clone() }
//! 	fn set_property( &mut self, name: &str, value: Value ) {
//! 		self.properties.insert( name.to_string(), value );
//! 	}
//! 	fn property( &self, name: &str ) -> Option<Value> {
//! 		self.properties.get( name ).cloned()
//! 	}
//! }
//!
//! // The compilation step is an external collaborator. This one has nothing
//! // left to compile and just converts the definition through.
//! struct PassthroughCompiler ;
//! impl ModuleCompiler for PassthroughCompiler {
//! 	fn compile( &self, raw: RawModuleDef ) -> LocalBoxFuture<'static, Result<ModuleFactory, LoadError>> {
//! 		async move { Ok( ModuleFactory::from( raw )) }.boxed_local()
//! 	}
//! }
//!
//! // So is the view tree: a mount point receiving root nodes...
//! #[derive( Default )]
//! struct Body { children: RefCell<Vec<NodeHandle>> }
//! impl MountPoint for Body {
//! 	fn append( &self, node: &NodeHandle ) { self.children.borrow_mut().push( node.clone() ); }
//! 	fn remove( &self, node: &NodeHandle ) {
//! 		self.children.borrow_mut().retain(| child | !NodeHandle::ptr_eq( child, node ));
//! 	}
//! }
//!
//! // ...and a scheduler notified when observable state changed.
//! struct Redraw ;
//! impl RenderScheduler for Redraw { fn request_render( &self ) {} }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // A just-in-time bundle: a pending namespace mapping export names to
//! // uncompiled module definitions.
//! let namespace = Rc::new( HashMap::from([(
//! 	"LazyModule".to_string(),
//! 	RawModuleDef::new( "LazyModule", vec![ ComponentFactory::new( "lz-lazy", Label::new ) ]),
//! )]));
//! let bundle = BundleRef::just_in_time( async move { namespace });
//!
//! let loader = Rc::new( bundle_link::ModuleLoader::just_in_time( Rc::new( PassthroughCompiler )));
//! let body = Rc::new( Body::default() );
//!
//! let mut pool = LocalPool::new();
//! let host = ComponentHost::new(
//! 	loader,
//! 	body.clone(),
//! 	Rc::new( Redraw ),
//! 	Rc::new( pool.spawner() ),
//! 	HostConfig::new( bundle, "LazyModule#lz-lazy" ).with_inputs( HashMap::from([
//! 		( "name".to_string(), Input::value( "Connor" )),
//! 		( "color".to_string(), Input::stream( StreamSource::new(|| {
//! 			futures::stream::iter( vec![ Value::from( "#000" ), Value::from( "#f00" )]).boxed_local()
//! 		}))),
//! 	])),
//! );
//!
//! pool.run_until( host.load() )?;
//! assert_eq!( body.children.borrow().len(), 1 );
//! assert_eq!( host.property( "name" ), Some( Value::from( "Connor" )));
//!
//! // The stream was subscribed at mount; drive the pool to drain its emissions.
//! pool.run_until_stalled();
//! assert_eq!( host.property( "color" ), Some( Value::from( "#f00" )));
//!
//! host.destroy();
//! assert!( body.children.borrow().is_empty() );
//! # Ok(())
//! # }
//! ```
//!
//! # Failure Model
//!
//! Every loading-state failure is fatal for the host that hit it: the error is
//! wrapped with the attempted identifier, the host ends in
//! [`HostState::LoadFailed`], and nothing mounts partially. A resolution miss
//! destroys the orphaned module instance before the error propagates, and a
//! host destroyed while its load is still in flight skips mounting when the
//! load eventually resolves.

mod value ;
mod bundle ;
mod module ;
mod component ;
mod view ;
mod loader ;
mod resolver ;
mod input ;
mod host ;

pub use value::Value ;
pub use bundle::{ BundleRef, Namespace, PendingNamespace, RawModuleDef };
pub use module::{ ModuleFactory, ModuleInstance };
pub use component::{ Component, ComponentFactory, ComponentInstance };
pub use view::{ MountPoint, NodeHandle, RenderScheduler };
pub use loader::{ LoadError, ModuleCompiler, ModuleLoader, ModuleRegistry };
pub use resolver::{ resolve, ResolveError };
pub use input::{ Input, StreamSource };
pub use host::{ ComponentHost, HostConfig, HostError, HostState };
