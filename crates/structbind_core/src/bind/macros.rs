/// Declare a typed struct with a generated descriptor table.
///
/// Every field is stored as `Option<T>` where `T: Bind`, and maps to a
/// declared name. A field may name an explicit setter and/or getter:
///
/// ```
/// use structbind::bind::{AccessorError, StructType};
///
/// structbind::structure! {
///     #[derive(Debug, Clone, Default)]
///     pub struct User {
///         pub user_name: String => "userName" [set = User::set_user_name],
///         pub age: i64 => "age",
///     }
/// }
///
/// impl User {
///     fn set_user_name(&mut self, value: Option<String>) -> Result<(), AccessorError> {
///         self.user_name = value.map(|name| name.trim().to_owned());
///         Ok(())
///     }
/// }
///
/// let (user, _) = User::from_json(r#"{"user_name": " ada ", "age": 36}"#).unwrap();
/// assert_eq!(user.user_name.as_deref(), Some("ada"));
/// ```
///
/// The struct must implement `Debug`, `Clone` and `Default`. Setters have
/// the signature `fn(&mut Self, Option<T>) -> Result<(), AccessorError>`,
/// getters `fn(&Self) -> Result<Option<T>, AccessorError>`.
#[macro_export]
macro_rules! structure {
	(
		$(#[$meta:meta])*
		$vis:vis struct $name:ident {
			$(
				$(#[$fmeta:meta])*
				$fvis:vis $field:ident : $ty:ty => $declared:literal $([set = $setter:path])? $([get = $getter:path])?
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		$vis struct $name {
			$(
				$(#[$fmeta])*
				$fvis $field: ::std::option::Option<$ty>,
			)*
		}

		impl $crate::bind::StructType for $name {
			fn type_schema() -> &'static ::std::sync::Arc<$crate::bind::StructSchema> {
				static SCHEMA: ::std::sync::OnceLock<::std::sync::Arc<$crate::bind::StructSchema>> = ::std::sync::OnceLock::new();
				SCHEMA.get_or_init(|| {
					::std::sync::Arc::new($crate::bind::StructSchema::native(
						stringify!($name),
						vec![$($crate::bind::FieldSchema::new($declared, <$ty as $crate::bind::Bind>::field_type())),*],
						$crate::bind::boxed_default::<$name>,
					))
				})
			}
		}

		impl $crate::bind::Struct for $name {
			fn schema(&self) -> &$crate::bind::StructSchema {
				<Self as $crate::bind::StructType>::type_schema()
			}

			fn read_field(&self, index: usize) -> ::std::option::Option<$crate::bind::Value> {
				#[allow(unused_variables)]
				let field = <Self as $crate::bind::StructType>::type_schema().field(index)?;
				$(
					if &*field.name == $declared {
						return self.$field.as_ref().map($crate::bind::Bind::to_value);
					}
				)*
				None
			}

			fn write_field(
				&mut self,
				index: usize,
				value: ::std::option::Option<$crate::bind::Value>,
			) -> ::std::result::Result<(), $crate::bind::AccessorError> {
				#[allow(unused_variables)]
				let field = <Self as $crate::bind::StructType>::type_schema()
					.field(index)
					.ok_or($crate::bind::AccessorError::NoSuchField { index })?;
				$(
					if &*field.name == $declared {
						self.$field = value.map(<$ty as $crate::bind::Bind>::from_value).transpose()?;
						return Ok(());
					}
				)*
				Err($crate::bind::AccessorError::NoSuchField { index })
			}

			fn has_getter(&self, index: usize) -> bool {
				#[allow(unused_variables)]
				let Some(field) = <Self as $crate::bind::StructType>::type_schema().field(index) else {
					return false;
				};
				$($(
					if &*field.name == $declared {
						let _: fn(&Self) -> ::std::result::Result<::std::option::Option<$ty>, $crate::bind::AccessorError> = $getter;
						return true;
					}
				)?)*
				false
			}

			fn has_setter(&self, index: usize) -> bool {
				#[allow(unused_variables)]
				let Some(field) = <Self as $crate::bind::StructType>::type_schema().field(index) else {
					return false;
				};
				$($(
					if &*field.name == $declared {
						let _: fn(&mut Self, ::std::option::Option<$ty>) -> ::std::result::Result<(), $crate::bind::AccessorError> = $setter;
						return true;
					}
				)?)*
				false
			}

			fn call_getter(&self, index: usize) -> ::std::result::Result<::std::option::Option<$crate::bind::Value>, $crate::bind::AccessorError> {
				#[allow(unused_variables)]
				let field = <Self as $crate::bind::StructType>::type_schema()
					.field(index)
					.ok_or($crate::bind::AccessorError::NoSuchField { index })?;
				$($(
					if &*field.name == $declared {
						let value: ::std::option::Option<$ty> = $getter(self)?;
						return Ok(value.as_ref().map($crate::bind::Bind::to_value));
					}
				)?)*
				Ok(self.read_field(index))
			}

			fn call_setter(
				&mut self,
				index: usize,
				value: ::std::option::Option<$crate::bind::Value>,
			) -> ::std::result::Result<(), $crate::bind::AccessorError> {
				#[allow(unused_variables)]
				let field = <Self as $crate::bind::StructType>::type_schema()
					.field(index)
					.ok_or($crate::bind::AccessorError::NoSuchField { index })?;
				$($(
					if &*field.name == $declared {
						let value: ::std::option::Option<$ty> = value.map(<$ty as $crate::bind::Bind>::from_value).transpose()?;
						return $setter(self, value);
					}
				)?)*
				self.write_field(index, value)
			}

			fn clone_boxed(&self) -> ::std::boxed::Box<dyn $crate::bind::Struct> {
				::std::boxed::Box::new(::std::clone::Clone::clone(self))
			}

			fn as_any(&self) -> &dyn ::std::any::Any {
				self
			}

			fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
				self
			}
		}

		impl $crate::bind::Bind for $name {
			fn field_type() -> $crate::bind::FieldType {
				$crate::bind::FieldType::Struct(::std::sync::Arc::clone(<Self as $crate::bind::StructType>::type_schema()))
			}

			fn from_value(value: $crate::bind::Value) -> ::std::result::Result<Self, $crate::bind::AccessorError> {
				$crate::bind::struct_from_value::<Self>(value)
			}

			fn to_value(&self) -> $crate::bind::Value {
				$crate::bind::Value::Struct(::std::boxed::Box::new(::std::clone::Clone::clone(self)))
			}
		}

		impl ::std::fmt::Display for $name {
			fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
				f.write_str(&$crate::bind::display_string(self))
			}
		}
	};
}

/// Declare a fieldless enum whose cases resolve from string labels.
///
/// ```
/// structbind::enumeration! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum Color {
///         Red => "RED",
///         Green => "GREEN",
///     }
/// }
///
/// use structbind::bind::Enumerable;
/// assert_eq!(Color::from_label("RED"), Some(Color::Red));
/// assert_eq!(Color::Green.label(), "GREEN");
/// ```
///
/// The enum must implement `Clone` and `Copy`. A case's underlying value is
/// its label.
#[macro_export]
macro_rules! enumeration {
	(
		$(#[$meta:meta])*
		$vis:vis enum $name:ident {
			$(
				$(#[$vmeta:meta])*
				$variant:ident => $label:literal
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		$vis enum $name {
			$(
				$(#[$vmeta])*
				$variant,
			)*
		}

		impl $crate::bind::Enumerable for $name {
			fn enum_schema() -> &'static ::std::sync::Arc<$crate::bind::EnumSchema> {
				static SCHEMA: ::std::sync::OnceLock<::std::sync::Arc<$crate::bind::EnumSchema>> = ::std::sync::OnceLock::new();
				SCHEMA.get_or_init(|| {
					::std::sync::Arc::new($crate::bind::EnumSchema::new(stringify!($name), vec![$($crate::bind::EnumCase::labeled($label)),*]))
				})
			}

			fn label(self) -> &'static str {
				match self {
					$(Self::$variant => $label,)*
				}
			}

			fn from_label(label: &str) -> ::std::option::Option<Self> {
				match label {
					$($label => Some(Self::$variant),)*
					_ => None,
				}
			}
		}

		impl $crate::bind::Bind for $name {
			fn field_type() -> $crate::bind::FieldType {
				$crate::bind::FieldType::Enum(::std::sync::Arc::clone(<Self as $crate::bind::Enumerable>::enum_schema()))
			}

			fn from_value(value: $crate::bind::Value) -> ::std::result::Result<Self, $crate::bind::AccessorError> {
				$crate::bind::enum_from_value::<Self>(value)
			}

			fn to_value(&self) -> $crate::bind::Value {
				$crate::bind::enum_to_value(*self)
			}
		}

		impl ::std::fmt::Display for $name {
			fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
				f.write_str($crate::bind::Enumerable::label(*self))
			}
		}
	};
}
