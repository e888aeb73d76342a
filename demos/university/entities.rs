//! University entities: users, groups and memberships

use async_graphql::dynamic::{InputObject, InputValue, TypeRef};
use gql_ug::prelude::*;

macro_rules! graph_type {
    ($ty:ident, $name:literal) => {
        #[async_trait]
        impl GraphType for $ty {
            fn type_name() -> &'static str {
                $name
            }

            async fn resolve_reference(info: &Context<'_>, id: Uuid) -> Result<Option<Self>> {
                match LoaderRegistry::from_context::<$ty>(info) {
                    Some(loader) => loader.load(id).await,
                    None => Ok(None),
                }
            }
        }
    };
}

#[derive(Clone, Debug)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub lastchange: DateTime<Utc>,
}

impl Entity for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn name_en(&self) -> &str {
        &self.name
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }

    fn attribute(&self, name: &str) -> Option<FieldValue> {
        match name {
            "surname" => Some(FieldValue::from(self.surname.as_str())),
            _ => base_attribute(self, name),
        }
    }
}

graph_type!(User, "UserGQLModel");

#[derive(Clone, Debug)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub name_en: String,
    pub lastchange: DateTime<Utc>,
    pub mastergroup_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub changedby: Option<Uuid>,
}

impl Entity for Group {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn name_en(&self) -> &str {
        &self.name_en
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }

    fn created_by(&self) -> Option<Uuid> {
        self.created_by
    }

    fn changedby(&self) -> Option<Uuid> {
        self.changedby
    }

    fn attribute(&self, name: &str) -> Option<FieldValue> {
        match name {
            "mastergroup_id" => Some(self.mastergroup_id.into()),
            _ => base_attribute(self, name),
        }
    }
}

graph_type!(Group, "GroupGQLModel");

#[derive(Clone, Debug)]
pub struct Membership {
    pub id: Uuid,
    pub lastchange: DateTime<Utc>,
    pub user_id: Uuid,
    pub group_id: Uuid,
}

impl Entity for Membership {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        ""
    }

    fn name_en(&self) -> &str {
        ""
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }

    fn attribute(&self, name: &str) -> Option<FieldValue> {
        match name {
            "user_id" => Some(self.user_id.into()),
            "group_id" => Some(self.group_id.into()),
            _ => base_attribute(self, name),
        }
    }
}

graph_type!(Membership, "MembershipGQLModel");

pub struct UserWhereFilter;

impl WhereFilter for UserWhereFilter {
    fn type_name() -> &'static str {
        "UserWhereFilter"
    }

    fn input_object() -> InputObject {
        InputObject::new(Self::type_name())
            .field(InputValue::new("name", TypeRef::named(TypeRef::STRING)))
            .field(InputValue::new("surname", TypeRef::named(TypeRef::STRING)))
    }
}

pub struct GroupWhereFilter;

impl WhereFilter for GroupWhereFilter {
    fn type_name() -> &'static str {
        "GroupWhereFilter"
    }

    fn input_object() -> InputObject {
        InputObject::new(Self::type_name())
            .field(InputValue::new("name", TypeRef::named(TypeRef::STRING)))
            .field(InputValue::new("name_en", TypeRef::named(TypeRef::STRING)))
            .field(InputValue::new("mastergroup_id", TypeRef::named("UUID")))
    }
}

pub struct MembershipWhereFilter;

impl WhereFilter for MembershipWhereFilter {
    fn type_name() -> &'static str {
        "MembershipWhereFilter"
    }

    fn input_object() -> InputObject {
        InputObject::new(Self::type_name())
            .field(InputValue::new("user_id", TypeRef::named("UUID")))
            .field(InputValue::new("group_id", TypeRef::named("UUID")))
    }
}
