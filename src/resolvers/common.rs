//! Field resolvers shared by every entity type

use async_graphql::Value as GqlValue;
use async_graphql::dynamic::{
    Field, FieldFuture, FieldValue, Object, Scalar, SchemaBuilder, TypeRef,
};
use uuid::Uuid;

use super::{DATETIME_SCALAR, UUID_SCALAR, parent, scalar_resolver};
use crate::core::{Entity, GraphType, ResolverError};

/// Build a field that reads a plain value off the parent entity
fn attribute_field<T: Entity>(
    name: &str,
    ty: TypeRef,
    description: &str,
    read: fn(&T) -> GqlValue,
) -> Field {
    Field::new(name, ty, move |ctx| {
        FieldFuture::new(async move {
            let entity = parent::<T>(&ctx, std::any::type_name::<T>())?;
            Ok(Some(FieldValue::value(read(entity))))
        })
    })
    .description(description)
}

fn timestamp(value: Option<chrono::DateTime<chrono::Utc>>) -> GqlValue {
    value
        .map(|dt| GqlValue::String(dt.to_rfc3339()))
        .unwrap_or(GqlValue::Null)
}

/// `id: UUID!`
pub fn id_field<T: Entity>() -> Field {
    attribute_field::<T>(
        "id",
        TypeRef::named_nn(UUID_SCALAR),
        "Entity primary key",
        |e| GqlValue::String(e.id().to_string()),
    )
}

/// `name: String!`
pub fn name_field<T: Entity>() -> Field {
    attribute_field::<T>("name", TypeRef::named_nn(TypeRef::STRING), "Name ", |e| {
        GqlValue::String(e.name().to_string())
    })
}

/// `nameEn: String!`
pub fn name_en_field<T: Entity>() -> Field {
    attribute_field::<T>(
        "nameEn",
        TypeRef::named_nn(TypeRef::STRING),
        "English name",
        |e| GqlValue::String(e.name_en().to_string()),
    )
}

/// `lastchange: DateTime!`
pub fn lastchange_field<T: Entity>() -> Field {
    attribute_field::<T>(
        "lastchange",
        TypeRef::named_nn(DATETIME_SCALAR),
        "Time of last update",
        |e| timestamp(Some(e.lastchange())),
    )
}

/// `created: DateTime`
pub fn created_field<T: Entity>() -> Field {
    attribute_field::<T>(
        "created",
        TypeRef::named(DATETIME_SCALAR),
        "Time of entity introduction",
        |e| timestamp(e.created()),
    )
}

/// `createdby: U`, resolved from `created_by`
pub fn createdby_field<T: Entity, U: GraphType>() -> Result<Field, ResolverError> {
    scalar_resolver::<T, U>()
        .foreign_key("created_by")
        .name("createdby")
        .description("Who created entity")
        .build()
}

/// `changedby: U`, resolved from `changedby`
pub fn changedby_field<T: Entity, U: GraphType>() -> Result<Field, ResolverError> {
    scalar_resolver::<T, U>()
        .foreign_key("changedby")
        .name("changedby")
        .description("Who made last change")
        .build()
}

/// Every shared field of `T`, with `U` as the user type behind
/// `createdby`/`changedby`
pub fn entity_fields<T: Entity, U: GraphType>() -> Result<Vec<Field>, ResolverError> {
    Ok(vec![
        id_field::<T>(),
        name_field::<T>(),
        name_en_field::<T>(),
        lastchange_field::<T>(),
        created_field::<T>(),
        createdby_field::<T, U>()?,
        changedby_field::<T, U>()?,
    ])
}

/// Add every field of `fields` to `object`
pub fn with_fields(object: Object, fields: impl IntoIterator<Item = Field>) -> Object {
    fields.into_iter().fold(object, |object, field| object.field(field))
}

/// Register the `UUID` and `DateTime` scalars used by the generated fields
pub fn register_scalars(builder: SchemaBuilder) -> SchemaBuilder {
    builder
        .register(
            Scalar::new(UUID_SCALAR)
                .description("UUID identifier")
                .validator(|value| match value {
                    GqlValue::String(s) => Uuid::parse_str(s).is_ok(),
                    _ => false,
                }),
        )
        .register(
            Scalar::new(DATETIME_SCALAR)
                .description("Date with time (isoformat)")
                .validator(|value| match value {
                    GqlValue::String(s) => chrono::DateTime::parse_from_rfc3339(s).is_ok(),
                    _ => false,
                }),
        )
}

/// Outcome of a create/update operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    pub id: Option<Uuid>,
    pub msg: String,
}

impl OperationResult {
    pub fn ok(id: Uuid) -> Self {
        Self {
            id: Some(id),
            msg: "ok".to_string(),
        }
    }

    pub fn fail(id: Option<Uuid>) -> Self {
        Self {
            id,
            msg: "fail".to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.msg == "ok"
    }

    /// Object type `name { id, msg }` for operation results
    pub fn object(name: &str) -> Object {
        Object::new(name)
            .field(result_id_field())
            .field(result_msg_field())
    }
}

/// `id: UUID` of an [`OperationResult`]
pub fn result_id_field() -> Field {
    Field::new("id", TypeRef::named(UUID_SCALAR), |ctx| {
        FieldFuture::new(async move {
            let result = parent::<OperationResult>(&ctx, "OperationResult")?;
            Ok(result
                .id
                .map(|id| FieldValue::value(GqlValue::String(id.to_string()))))
        })
    })
    .description("primary key of CU operation object")
}

/// `msg: String!` of an [`OperationResult`]
pub fn result_msg_field() -> Field {
    Field::new("msg", TypeRef::named_nn(TypeRef::STRING), |ctx| {
        FieldFuture::new(async move {
            let result = parent::<OperationResult>(&ctx, "OperationResult")?;
            Ok(Some(FieldValue::value(GqlValue::String(result.msg.clone()))))
        })
    })
    .description(
        "Should be `ok` if desired state has been reached, otherwise `fail`.\n\
         For update operation fail should be also stated when bad lastchange has been entered.",
    )
}
