pub mod value;

pub use value::{coerce, FieldKind, FieldValue, Value};

use crate::compiler::CompileError;
use crate::lang::PropertyPath;

use once_cell::sync::OnceCell;
use thiserror::Error;

use std::{any::Any, collections::HashMap, fmt, marker::PhantomData};

/// Storage for a lazily built, process-wide schema.
///
/// ```ignore
/// impl Record for Person {
///     fn schema() -> &'static Schema {
///         static SCHEMA: SchemaCell = SchemaCell::new();
///         SCHEMA.get_or_init(|| /* Schema::builder::<Person>("Person")... */)
///     }
/// }
/// ```
pub type SchemaCell = OnceCell<Schema>;

/// A row type that filters can be compiled against.
pub trait Record: Sized + 'static {
    fn schema() -> &'static Schema;
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field `{field}` is declared twice in schema `{schema}`")]
    DuplicateField { schema: &'static str, field: String },
}

type Getter = Box<dyn for<'a> Fn(&'a dyn Any) -> Option<Value<'a>> + Send + Sync>;
type Project = Box<dyn for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync>;

fn getter<F>(get: F) -> Getter
where
    F: for<'a> Fn(&'a dyn Any) -> Option<Value<'a>> + Send + Sync + 'static,
{
    Box::new(get)
}

fn project<F>(get: F) -> Project
where
    F: for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync + 'static,
{
    Box::new(get)
}

enum Access {
    Scalar(Getter),
    Record { project: Project, schema: fn() -> &'static Schema },
}

pub struct Field {
    name: String,
    kind: FieldKind,
    access: Access,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Schema of a nested record, `None` for scalar fields.
    pub fn nested(&self) -> Option<&'static Schema> {
        match &self.access {
            Access::Record { schema, .. } => Some(schema()),
            Access::Scalar(_) => None,
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Case-insensitive mapping from field names to typed accessors of one
/// row type.
pub struct Schema {
    name: &'static str,
    fields: Vec<Field>,
    index: HashMap<String, usize>,
}

impl Schema {
    pub fn builder<T: 'static>(name: &'static str) -> SchemaBuilder<T> {
        SchemaBuilder {
            name,
            fields: vec![],
            row: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a single field, ignoring case.
    pub fn resolve_field(&self, name: &str) -> Option<&Field> {
        self.index
            .get(&name.to_lowercase())
            .map(|&index| &self.fields[index])
    }

    /// Walks `path` through nested records down to a scalar field.
    pub fn resolve(&self, path: &PropertyPath) -> Result<FieldDescriptor<'_>, CompileError> {
        let unknown = |segment: &str| CompileError::UnknownField {
            path: path.to_string(),
            segment: segment.to_string(),
        };

        let mut schema = self;
        let mut steps: Vec<&Field> = vec![];

        for segment in path.segments() {
            if let Some(previous) = steps.last() {
                schema = match previous.nested() {
                    Some(nested) => nested,
                    None => return Err(unknown(segment)),
                };
            }

            match schema.resolve_field(segment) {
                Some(field) => steps.push(field),
                None => return Err(unknown(segment)),
            }
        }

        if !steps.last().map_or(false, |field| field.kind.is_scalar()) {
            return Err(unknown(path.last()));
        }

        Ok(FieldDescriptor {
            path: path.clone(),
            steps,
        })
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

pub struct SchemaBuilder<T> {
    name: &'static str,
    fields: Vec<Field>,
    row: PhantomData<fn(&T)>,
}

impl<T: 'static> SchemaBuilder<T> {
    /// Adds a scalar field read by value.
    pub fn field<V, F>(mut self, name: &str, get: F) -> Self
    where
        V: FieldValue,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        let access = Access::Scalar(getter(move |row| {
            row.downcast_ref::<T>().map(|row| get(row).into_value())
        }));

        self.push(name, V::KIND, access);
        self
    }

    /// Adds a text field read by reference.
    pub fn text<F>(mut self, name: &str, get: F) -> Self
    where
        F: for<'r> Fn(&'r T) -> &'r str + Send + Sync + 'static,
    {
        let access = Access::Scalar(getter(move |row| {
            row.downcast_ref::<T>().map(|row| Value::Str(get(row).into()))
        }));

        self.push(name, FieldKind::Str, access);
        self
    }

    /// Adds a nested record that paths can walk into.
    pub fn record<U, F>(mut self, name: &str, get: F) -> Self
    where
        U: Record,
        F: for<'r> Fn(&'r T) -> &'r U + Send + Sync + 'static,
    {
        let access = Access::Record {
            project: project(move |row| {
                row.downcast_ref::<T>().map(|row| get(row) as &dyn Any)
            }),
            schema: U::schema,
        };

        self.push(name, FieldKind::Record, access);
        self
    }

    fn push(&mut self, name: &str, kind: FieldKind, access: Access) {
        self.fields.push(Field {
            name: name.to_string(),
            kind,
            access,
        });
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut index = HashMap::new();

        for (position, field) in self.fields.iter().enumerate() {
            if index.insert(field.name.to_lowercase(), position).is_some() {
                return Err(SchemaError::DuplicateField {
                    schema: self.name,
                    field: field.name.clone(),
                });
            }
        }

        Ok(Schema {
            name: self.name,
            fields: self.fields,
            index,
        })
    }
}

/// A resolved property path: the chain of fields from the row down to a
/// scalar.
#[derive(Debug)]
pub struct FieldDescriptor<'s> {
    path: PropertyPath,
    steps: Vec<&'s Field>,
}

impl<'s> FieldDescriptor<'s> {
    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    pub fn kind(&self) -> FieldKind {
        // resolution only succeeds with at least one step
        self.steps.last().map(|f| f.kind).unwrap_or(FieldKind::Record)
    }

    /// Reads the value at the end of the path.
    ///
    /// `None` when `row` is not of the type the schema was built for.
    pub fn read<'a>(&self, row: &'a dyn Any) -> Option<Value<'a>> {
        let (last, init) = self.steps.split_last()?;

        let mut current = row;
        for step in init {
            current = match &step.access {
                Access::Record { project, .. } => project(current)?,
                Access::Scalar(_) => return None,
            };
        }

        match &last.access {
            Access::Scalar(get) => get(current),
            Access::Record { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests;
