//! Dynamic property values.
//!
//! Components loaded at runtime are not statically typed, so their inputs flow
//! through a small dynamic value enum. [`Value::Null`] doubles as the
//! "not yet available" sentinel written when a stream subscription begins.

/// A dynamic value assignable to a component property.
#[derive( Debug, Clone, PartialEq, Default )]
pub enum Value {
	/// No value. Also the sentinel written before a stream's first emission.
	#[default] Null,
	Bool( bool ),
	Int( i64 ),
	Float( f64 ),
	Str( String ),
	List( Vec<Value> ),
}

impl Value {
	/// Whether this is the [`Value::Null`] sentinel.
	#[inline] pub fn is_null( &self ) -> bool { matches!( self, Self::Null )}
}

impl From<bool> for Value {
	fn from( value: bool ) -> Self { Self::Bool( value )}
}

impl From<i64> for Value {
	fn from( value: i64 ) -> Self { Self::Int( value )}
}

impl From<f64> for Value {
	fn from( value: f64 ) -> Self { Self::Float( value )}
}

impl From<&str> for Value {
	fn from( value: &str ) -> Self { Self::Str( value.to_string() )}
}

impl From<String> for Value {
	fn from( value: String ) -> Self { Self::Str( value )}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from( values: Vec<T> ) -> Self {
		Self::List( values.into_iter().map( Into::into ).collect() )
	}
}
