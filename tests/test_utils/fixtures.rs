#[allow( dead_code )]
mod fixtures {

	use std::cell::{ Cell, RefCell };
	use std::collections::HashMap ;
	use std::rc::Rc ;

	use futures::executor::LocalPool ;
	use futures::future::{ FutureExt, LocalBoxFuture };
	use futures::stream::StreamExt ;

	use bundle_link::{
		BundleRef, Component, ComponentFactory, ComponentHost, HostConfig, Input,
		LoadError, ModuleCompiler, ModuleFactory, ModuleLoader, ModuleRegistry,
		MountPoint, Namespace, NodeHandle, RawModuleDef, RenderScheduler,
		StreamSource, Value,
	};

	/// Property-bag component used by every scenario.
	pub struct Label {
		root: NodeHandle,
		properties: HashMap<String, Value>,
		destroyed: Rc<Cell<usize>>,
	}

	impl Component for Label {
		fn root( &self ) -> NodeHandle { self.root.clone() }
		fn set_property( &mut self, name: &str, value: Value ) {
			self.properties.insert( name.to_string(), value );
		}
		fn property( &self, name: &str ) -> Option<Value> {
			self.properties.get( name ).cloned()
		}
		fn on_destroy( &mut self ) {
			self.destroyed.set( self.destroyed.get() + 1 );
		}
	}

	/// Factory for a [`Label`] registered under `selector`; `destroyed` counts
	/// destroy-hook invocations across all instances.
	pub fn label_factory( selector: &str, destroyed: Rc<Cell<usize>> ) -> ComponentFactory {
		let tag = selector.to_string();
		ComponentFactory::new( selector, move || Box::new( Label {
			root: NodeHandle::new( tag.clone() ),
			properties: HashMap::new(),
			destroyed: Rc::clone( &destroyed ),
		}))
	}

	/// Destroy-hook counters observed by leak and teardown scenarios.
	#[derive( Default )]
	pub struct DestroyCounters {
		pub module: Rc<Cell<usize>>,
		pub component: Rc<Cell<usize>>,
	}

	/// The `LazyModule` fixture: one `lz-lazy` component, destroy hooks wired
	/// to `counters`.
	pub fn lazy_module( counters: &DestroyCounters ) -> ModuleFactory {
		let module_destroys = Rc::clone( &counters.module );
		ModuleFactory::new( "LazyModule", vec![ label_factory( "lz-lazy", Rc::clone( &counters.component )) ])
			.with_destroy_hook( move || module_destroys.set( module_destroys.get() + 1 ))
	}

	/// The conventional registry path the ahead-of-time strategy derives from
	/// the `"lazy.module"` hint.
	pub const LAZY_PATH: &str = "../lazy/lazy.module#LazyModule" ;

	/// Ahead-of-time loader whose registry holds only the lazy module.
	pub fn aot_lazy_loader( counters: &DestroyCounters ) -> Rc<ModuleLoader> {
		let registry = FakeRegistry::default().with_module( LAZY_PATH, lazy_module( counters ));
		Rc::new( ModuleLoader::ahead_of_time( Rc::new( registry )))
	}

	/// Just-in-time namespace exporting the lazy module.
	pub fn lazy_namespace( counters: &DestroyCounters ) -> Namespace {
		Rc::new( HashMap::from([(
			"LazyModule".to_string(),
			RawModuleDef::new( "LazyModule", vec![ label_factory( "lz-lazy", Rc::clone( &counters.component )) ]),
		)]))
	}

	/// In-memory registry keyed by the conventional path, recording requests.
	#[derive( Default )]
	pub struct FakeRegistry {
		modules: RefCell<HashMap<String, ModuleFactory>>,
		pub requested: RefCell<Vec<String>>,
	}

	impl FakeRegistry {
		pub fn with_module( self, path: &str, factory: ModuleFactory ) -> Self {
			self.modules.borrow_mut().insert( path.to_string(), factory );
			self
		}
	}

	impl ModuleRegistry for FakeRegistry {
		fn resolve_and_load( &self, path: &str ) -> LocalBoxFuture<'static, Result<ModuleFactory, LoadError>> {
			self.requested.borrow_mut().push( path.to_string() );
			let result = self.modules.borrow().get( path ).cloned()
				.ok_or_else(|| LoadError::ModuleUnregistered( path.to_string() ));
			async move { result }.boxed_local()
		}
	}

	/// Compiler with nothing left to compile.
	pub struct PassthroughCompiler ;

	impl ModuleCompiler for PassthroughCompiler {
		fn compile( &self, raw: RawModuleDef ) -> LocalBoxFuture<'static, Result<ModuleFactory, LoadError>> {
			async move { Ok( ModuleFactory::from( raw )) }.boxed_local()
		}
	}

	/// Compiler rejecting every definition.
	pub struct RejectingCompiler ;

	impl ModuleCompiler for RejectingCompiler {
		fn compile( &self, _raw: RawModuleDef ) -> LocalBoxFuture<'static, Result<ModuleFactory, LoadError>> {
			async move { Err( LoadError::CompilationFailed( "template parse error".into() )) }.boxed_local()
		}
	}

	/// Mount point recording every appended root node.
	#[derive( Default )]
	pub struct Body {
		pub children: RefCell<Vec<NodeHandle>>,
		pub appended: Cell<usize>,
	}

	impl MountPoint for Body {
		fn append( &self, node: &NodeHandle ) {
			self.appended.set( self.appended.get() + 1 );
			self.children.borrow_mut().push( node.clone() );
		}
		fn remove( &self, node: &NodeHandle ) {
			self.children.borrow_mut().retain(| child | !NodeHandle::ptr_eq( child, node ));
		}
	}

	/// Scheduler counting re-render requests.
	#[derive( Default )]
	pub struct Redraw {
		pub requested: Cell<usize>,
	}

	impl RenderScheduler for Redraw {
		fn request_render( &self ) {
			self.requested.set( self.requested.get() + 1 );
		}
	}

	/// A stream source backed by a channel the test feeds by hand.
	pub fn channel_source() -> ( futures::channel::mpsc::UnboundedSender<Value>, StreamSource ) {
		let ( sender, receiver ) = futures::channel::mpsc::unbounded();
		let receiver = RefCell::new( Some( receiver ));
		let source = StreamSource::new( move || {
			receiver.borrow_mut().take().expect( "channel source opened twice" ).boxed_local()
		});
		( sender, source )
	}

	/// Builds a host over recording collaborators.
	pub fn build_host_with_config(
		loader: Rc<ModuleLoader>,
		config: HostConfig,
	) -> ( LocalPool, Rc<Body>, Rc<Redraw>, ComponentHost ) {
		let pool = LocalPool::new();
		let body = Rc::new( Body::default() );
		let redraw = Rc::new( Redraw::default() );
		let host = ComponentHost::new(
			loader,
			body.clone(),
			redraw.clone(),
			Rc::new( pool.spawner() ),
			config,
		);
		( pool, body, redraw, host )
	}

	/// [`build_host_with_config`] with the default stream-unwrapping behavior.
	pub fn build_host(
		loader: Rc<ModuleLoader>,
		bundle: BundleRef,
		component: &str,
		inputs: HashMap<String, Input>,
	) -> ( LocalPool, Rc<Body>, Rc<Redraw>, ComponentHost ) {
		build_host_with_config( loader, HostConfig::new( bundle, component ).with_inputs( inputs ))
	}

}
