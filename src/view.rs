//! View-tree collaborator interfaces.
//!
//! The crate does not render anything itself. The embedding environment supplies
//! a [`MountPoint`] where mounted components append their root node, and a
//! [`RenderScheduler`] the host notifies whenever observable state changed.

use std::rc::Rc ;

/// A handle to one live visual node.
///
/// Handles are compared by identity, never by content: two nodes with the same
/// tag are still two nodes.
#[derive( Clone )]
pub struct NodeHandle( Rc<NodeInner> );

struct NodeInner {
	tag: String,
}

impl NodeHandle {
	/// Creates a fresh node with the given tag.
	pub fn new( tag: impl Into<String> ) -> Self {
		Self( Rc::new( NodeInner { tag: tag.into() }))
	}

	/// The node's tag.
	#[inline] pub fn tag( &self ) -> &str { &self.0.tag }

	/// Identity comparison between two handles.
	#[inline] pub fn ptr_eq( left: &Self, right: &Self ) -> bool { Rc::ptr_eq( &left.0, &right.0 )}
}

impl std::fmt::Debug for NodeHandle {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_tuple( "NodeHandle" ).field( &self.0.tag ).finish()
	}
}

/// A live container node plus an insertion point in the view tree.
///
/// The host appends exactly one root node per mounted component and removes it
/// again at teardown.
pub trait MountPoint {
	/// Appends `node` under this container.
	fn append( &self, node: &NodeHandle );
	/// Removes `node` from this container. Unknown nodes are ignored.
	fn remove( &self, node: &NodeHandle );
}

/// The embedding environment's re-render capability.
///
/// Called whenever a mounted component's observable state changed: once per
/// input-set application and once per stream emission.
pub trait RenderScheduler {
	/// Requests one re-render pass.
	fn request_render( &self );
}
