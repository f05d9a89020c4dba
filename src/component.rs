//! Component types.
//!
//! A component is an instantiable unit with a root visual node and named
//! properties. Modules expose their components through an explicit registry of
//! [`ComponentFactory`] entries keyed by a public selector string - there is no
//! reaching into implementation-private structures to find one.

use std::cell::RefCell ;
use std::rc::Rc ;

use crate::value::Value ;
use crate::view::NodeHandle ;

/// An instantiable visual unit with named properties.
///
/// Implementations create their root node at construction time; the host
/// appends it under the mount point and writes inputs through
/// [`set_property`]( Component::set_property ).
pub trait Component {
	/// The component's root visual node.
	fn root( &self ) -> NodeHandle ;

	/// Assigns a named property.
	fn set_property( &mut self, name: &str, value: Value );

	/// Reads back a named property, if set.
	fn property( &self, name: &str ) -> Option<Value>;

	/// Lifecycle hook invoked exactly once when the component is destroyed.
	fn on_destroy( &mut self ) {}
}

/// A selector paired with a component constructor, registered inside a module.
#[derive( Clone )]
pub struct ComponentFactory {
	/// Public identifier the component is looked up by within its module
	selector: String,
	construct: Rc<dyn Fn() -> Box<dyn Component>>,
}

impl ComponentFactory {
	/// Creates a registry entry for `selector`.
	pub fn new(
		selector: impl Into<String>,
		construct: impl Fn() -> Box<dyn Component> + 'static,
	) -> Self {
		Self {
			selector: selector.into(),
			construct: Rc::new( construct ),
		}
	}

	/// The public selector this entry is looked up by.
	#[inline] pub fn selector( &self ) -> &str { &self.selector }

	/// Constructs a fresh component instance.
	pub fn create( &self ) -> ComponentInstance {
		ComponentInstance::new(( self.construct )())
	}
}

impl std::fmt::Debug for ComponentFactory {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "ComponentFactory" )
			.field( "selector", &self.selector )
			.finish_non_exhaustive()
	}
}

/// A constructed, mountable component.
///
/// The inner component is shared behind `Rc<RefCell<..>>` because stream
/// subscriptions write properties while the host owns the instance. Destroyed
/// exactly once, always before its owning module instance.
pub struct ComponentInstance {
	component: Rc<RefCell<Box<dyn Component>>>,
	root: NodeHandle,
	destroyed: bool,
}

impl ComponentInstance {
	fn new( component: Box<dyn Component> ) -> Self {
		let root = component.root();
		Self {
			component: Rc::new( RefCell::new( component )),
			root,
			destroyed: false,
		}
	}

	/// The component's root node, extracted at construction.
	#[inline] pub fn root( &self ) -> NodeHandle { self.root.clone() }

	/// Assigns a named property on the component.
	pub fn set_property( &self, name: &str, value: Value ) {
		self.component.borrow_mut().set_property( name, value );
	}

	/// Reads back a named property from the component.
	pub fn property( &self, name: &str ) -> Option<Value> {
		self.component.borrow().property( name )
	}

	/// Shared handle for subscription tasks that outlive a single borrow.
	pub(crate) fn shared( &self ) -> Rc<RefCell<Box<dyn Component>>> {
		Rc::clone( &self.component )
	}

	/// Runs the component's destroy hook. Idempotent.
	pub fn destroy( &mut self ) {
		if self.destroyed { return }
		self.destroyed = true ;
		self.component.borrow_mut().on_destroy();
	}

	/// Whether [`destroy`]( Self::destroy ) already ran.
	#[inline] pub fn is_destroyed( &self ) -> bool { self.destroyed }
}

impl std::fmt::Debug for ComponentInstance {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "ComponentInstance" )
			.field( "root", &self.root )
			.field( "destroyed", &self.destroyed )
			.finish_non_exhaustive()
	}
}
