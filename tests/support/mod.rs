//! Shared fixtures: a small user/group/membership schema over recording loaders

#![allow(dead_code)]

use async_graphql::dynamic::{Field, InputObject, InputValue, Object, Schema, TypeRef};
use async_graphql::{Request, Response};
use gql_ug::prelude::*;
use serde_json::Value;
use std::sync::{Arc, Mutex};

// =============================================================================
// Entities
// =============================================================================

#[derive(Clone, Debug)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub lastchange: DateTime<Utc>,
    pub created_by: Option<Uuid>,
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

    fn created_by(&self) -> Option<Uuid> {
        self.created_by
    }
}

#[async_trait]
impl GraphType for User {
    fn type_name() -> &'static str {
        "UserGQLModel"
    }

    async fn resolve_reference(info: &Context<'_>, id: Uuid) -> Result<Option<Self>> {
        match LoaderRegistry::from_context::<User>(info) {
            Some(loader) => loader.load(id).await,
            None => Ok(None),
        }
    }
}

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

#[async_trait]
impl GraphType for Group {
    fn type_name() -> &'static str {
        "GroupGQLModel"
    }

    async fn resolve_reference(info: &Context<'_>, id: Uuid) -> Result<Option<Self>> {
        match LoaderRegistry::from_context::<Group>(info) {
            Some(loader) => loader.load(id).await,
            None => Ok(None),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Membership {
    pub id: Uuid,
    pub name: String,
    pub lastchange: DateTime<Utc>,
    pub user_id: Uuid,
    pub group_id: Uuid,
}

impl Entity for Membership {
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
            "user_id" => Some(FieldValue::Uuid(self.user_id)),
            "group_id" => Some(FieldValue::Uuid(self.group_id)),
            _ => base_attribute(self, name),
        }
    }
}

#[async_trait]
impl GraphType for Membership {
    fn type_name() -> &'static str {
        "MembershipGQLModel"
    }

    async fn resolve_reference(info: &Context<'_>, id: Uuid) -> Result<Option<Self>> {
        match LoaderRegistry::from_context::<Membership>(info) {
            Some(loader) => loader.load(id).await,
            None => Ok(None),
        }
    }
}

// =============================================================================
// Where filters
// =============================================================================

pub struct GroupWhereFilter;

impl WhereFilter for GroupWhereFilter {
    fn type_name() -> &'static str {
        "GroupWhereFilter"
    }

    fn input_object() -> InputObject {
        InputObject::new(Self::type_name())
            .field(InputValue::new("name", TypeRef::named(TypeRef::STRING)))
            .field(InputValue::new("name_en", TypeRef::named(TypeRef::STRING)))
    }
}

pub struct MembershipWhereFilter;

impl WhereFilter for MembershipWhereFilter {
    fn type_name() -> &'static str {
        "MembershipWhereFilter"
    }

    fn input_object() -> InputObject {
        InputObject::new(Self::type_name())
            .field(InputValue::new("name", TypeRef::named(TypeRef::STRING)))
            .field(InputValue::new("user_id", TypeRef::named("UUID")))
    }
}

// =============================================================================
// Recording loader
// =============================================================================

/// Arguments of one `page` call
#[derive(Debug, Clone, PartialEq)]
pub struct PageCall {
    pub skip: i64,
    pub limit: i64,
    pub where_: Option<Filter>,
    pub extendedfilter: Option<Filter>,
}

/// In-memory loader that records every call it receives
pub struct RecordingLoader<T: Entity> {
    inner: InMemoryLoader<T>,
    pub pages: Mutex<Vec<PageCall>>,
    pub loads: Mutex<Vec<Uuid>>,
}

impl<T: Entity> RecordingLoader<T> {
    pub fn new(items: Vec<T>) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryLoader::with_items(items).expect("Failed to seed loader"),
            pages: Mutex::new(Vec::new()),
            loads: Mutex::new(Vec::new()),
        })
    }

    pub fn page_calls(&self) -> Vec<PageCall> {
        self.pages.lock().unwrap().clone()
    }

    pub fn load_calls(&self) -> Vec<Uuid> {
        self.loads.lock().unwrap().clone()
    }
}

#[async_trait]
impl<T: Entity> Loader<T> for RecordingLoader<T> {
    async fn page(
        &self,
        skip: i64,
        limit: i64,
        where_: Option<Filter>,
        extendedfilter: Option<Filter>,
    ) -> Result<Vec<T>> {
        self.pages.lock().unwrap().push(PageCall {
            skip,
            limit,
            where_: where_.clone(),
            extendedfilter: extendedfilter.clone(),
        });
        self.inner.page(skip, limit, where_, extendedfilter).await
    }

    async fn load(&self, id: Uuid) -> Result<Option<T>> {
        self.loads.lock().unwrap().push(id);
        self.inner.load(id).await
    }
}

// =============================================================================
// Fixture
// =============================================================================

pub struct Fixture {
    pub users: Arc<RecordingLoader<User>>,
    pub groups: Arc<RecordingLoader<Group>>,
    pub memberships: Arc<RecordingLoader<Membership>>,
    pub alice: User,
    pub bob: User,
    pub faculty: Group,
    pub department: Group,
}

impl Fixture {
    pub fn new() -> Self {
        let now = Utc::now();
        let alice = User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            lastchange: now,
            created_by: None,
        };
        let bob = User {
            id: Uuid::new_v4(),
            name: "Bob".to_string(),
            lastchange: now,
            created_by: Some(alice.id),
        };
        let faculty = Group {
            id: Uuid::new_v4(),
            name: "Fakulta".to_string(),
            name_en: "Faculty".to_string(),
            lastchange: now,
            mastergroup_id: None,
            created_by: Some(alice.id),
            changedby: Some(bob.id),
        };
        let department = Group {
            id: Uuid::new_v4(),
            name: "Katedra".to_string(),
            name_en: "Department".to_string(),
            lastchange: now,
            mastergroup_id: Some(faculty.id),
            created_by: Some(alice.id),
            changedby: None,
        };
        let membership = |user: &User, group: &Group| Membership {
            id: Uuid::new_v4(),
            name: format!("{}@{}", user.name, group.name_en),
            lastchange: now,
            user_id: user.id,
            group_id: group.id,
        };
        let memberships = vec![
            membership(&alice, &faculty),
            membership(&bob, &faculty),
            membership(&bob, &department),
        ];

        Self {
            users: RecordingLoader::new(vec![alice.clone(), bob.clone()]),
            groups: RecordingLoader::new(vec![faculty.clone(), department.clone()]),
            memberships: RecordingLoader::new(memberships),
            alice,
            bob,
            faculty,
            department,
        }
    }

    /// Registry with every loader
    pub fn loaders(&self) -> LoaderRegistry {
        LoaderRegistry::new()
            .with::<User>(self.users.clone())
            .with::<Group>(self.groups.clone())
            .with::<Membership>(self.memberships.clone())
    }

    /// Schema over every loader
    pub fn schema(&self) -> Schema {
        build_schema(self.loaders(), &ResolverConfig::default())
    }
}

fn memberships_of<P: Entity>(foreign_key: &str, config: &ResolverConfig) -> Field {
    vector_resolver::<P, Membership>()
        .config(config)
        .foreign_key(foreign_key)
        .loader(LoaderRegistry::lambda::<Membership>())
        .where_filter::<MembershipWhereFilter>()
        .name("memberships")
        .build()
        .expect("memberships field")
}

/// The test schema: users, groups (with master groups) and memberships
pub fn build_schema(loaders: LoaderRegistry, config: &ResolverConfig) -> Schema {
    let user = with_fields(
        Object::new(User::type_name()),
        entity_fields::<User, User>().expect("user fields"),
    )
    .field(memberships_of::<User>("user_id", config));

    let group = with_fields(
        Object::new(Group::type_name()),
        entity_fields::<Group, User>().expect("group fields"),
    )
    .field(
        scalar_resolver::<Group, Group>()
            .foreign_key("mastergroup_id")
            .build()
            .expect("mastergroup field"),
    )
    .field(memberships_of::<Group>("group_id", config))
    .field(
        vector_resolver::<Group, Group>()
            .config(config)
            .foreign_key("mastergroup_id")
            .loader(LoaderRegistry::lambda::<Group>())
            .name("subgroups")
            .build()
            .expect("subgroups field"),
    );

    let membership = Object::new(Membership::type_name())
        .field(id_field::<Membership>())
        .field(name_field::<Membership>())
        .field(
            scalar_resolver::<Membership, User>()
                .foreign_key("user_id")
                .build()
                .expect("user field"),
        )
        .field(
            scalar_resolver::<Membership, Group>()
                .foreign_key("group_id")
                .permission(AuthPolicy::Authenticated.into_permission())
                .build()
                .expect("group field"),
        );

    let query = Object::new("Query")
        .field(root_by_id::<Group>("groupById").build().expect("groupById"))
        .field(root_by_id::<User>("userById").build().expect("userById"))
        .field(
            root_page::<Group>("groupPage")
                .config(config)
                .loader(LoaderRegistry::lambda::<Group>())
                .where_filter::<GroupWhereFilter>()
                .build()
                .expect("groupPage"),
        );

    register_scalars(Schema::build("Query", None, None))
        .register(user)
        .register(group)
        .register(membership)
        .register(GroupWhereFilter::input_object())
        .register(MembershipWhereFilter::input_object())
        .register(query)
        .data(loaders)
        .finish()
        .expect("Failed to build schema")
}

// =============================================================================
// Helpers
// =============================================================================

pub async fn execute(schema: &Schema, query: impl Into<String>) -> Response {
    schema.execute(Request::new(query.into())).await
}

pub async fn execute_as(schema: &Schema, query: impl Into<String>, auth: AuthContext) -> Response {
    schema.execute(Request::new(query.into()).data(auth)).await
}

/// Data of a successful response
pub fn data(response: Response) -> Value {
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().expect("response data is JSON")
}

/// `code` extension of the first error
pub fn first_error_code(response: &Response) -> Option<String> {
    response
        .errors
        .first()
        .and_then(|e| e.extensions.as_ref())
        .and_then(|ext| ext.get("code"))
        .and_then(|code| match code {
            async_graphql::Value::String(s) => Some(s.clone()),
            _ => None,
        })
}
