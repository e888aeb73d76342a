//! University directory served over GraphQL
//!
//! Users, groups and memberships wired together with the resolver factories:
//! - `group.mastergroup` follows a foreign key
//! - `group.memberships`, `group.subgroups` and `user.memberships` page related items
//! - `groupById`, `groupPage`, `userById`, `userPage` at the root
//!
//! Set `GQL_UG_CONFIG` to a YAML file to override paging defaults.

mod entities;

use anyhow::Result;
use entities::{Group, GroupWhereFilter, Membership, MembershipWhereFilter, User, UserWhereFilter};
use gql_ug::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,gql_ug=debug")),
        )
        .init();

    let config = match std::env::var("GQL_UG_CONFIG") {
        Ok(path) => ResolverConfig::from_yaml_file(&path)?,
        Err(_) => ResolverConfig::default(),
    };

    let loaders = populate_test_data()?;
    let schema = build_schema(loaders, &config)?;

    println!("\n🌐 Server running on http://127.0.0.1:3000");
    println!("\n📚 Available endpoints:");
    println!("    POST   /graphql              - GraphQL endpoint");
    println!("    GET    /graphql/playground   - GraphQL Playground");
    println!("    GET    /graphql/schema       - Schema SDL");
    println!("\n  Try sending header x-user-id to see membership groups\n");

    let app = GraphQLExposure::build_router(schema)?;
    serve(app, "127.0.0.1:3000").await
}

fn build_schema(loaders: LoaderRegistry, config: &ResolverConfig) -> Result<Schema> {
    let authenticated = AuthPolicy::Authenticated.into_permission();

    let user = with_fields(
        Object::new(User::type_name()),
        entity_fields::<User, User>()?,
    )
    .field(
        vector_resolver::<User, Membership>()
            .config(config)
            .foreign_key("user_id")
            .loader(LoaderRegistry::lambda::<Membership>())
            .where_filter::<MembershipWhereFilter>()
            .name("memberships")
            .build()?,
    );

    let group = with_fields(
        Object::new(Group::type_name()),
        entity_fields::<Group, User>()?,
    )
    .field(
        scalar_resolver::<Group, Group>()
            .config(config)
            .foreign_key("mastergroup_id")
            .build()?,
    )
    .field(
        vector_resolver::<Group, Group>()
            .config(config)
            .foreign_key("mastergroup_id")
            .loader(LoaderRegistry::lambda::<Group>())
            .where_filter::<GroupWhereFilter>()
            .name("subgroups")
            .build()?,
    )
    .field(
        vector_resolver::<Group, Membership>()
            .config(config)
            .foreign_key("group_id")
            .loader(LoaderRegistry::lambda::<Membership>())
            .where_filter::<MembershipWhereFilter>()
            .name("memberships")
            .build()?,
    );

    let membership = Object::new(Membership::type_name())
        .field(id_field::<Membership>())
        .field(lastchange_field::<Membership>())
        .field(
            scalar_resolver::<Membership, User>()
                .config(config)
                .foreign_key("user_id")
                .build()?,
        )
        .field(
            scalar_resolver::<Membership, Group>()
                .config(config)
                .foreign_key("group_id")
                .permission(authenticated)
                .build()?,
        );

    let query = Object::new("Query")
        .field(root_by_id::<Group>("groupById").config(config).build()?)
        .field(root_by_id::<User>("userById").config(config).build()?)
        .field(
            root_page::<Group>("groupPage")
                .config(config)
                .loader(LoaderRegistry::lambda::<Group>())
                .where_filter::<GroupWhereFilter>()
                .build()?,
        )
        .field(
            root_page::<User>("userPage")
                .config(config)
                .loader(LoaderRegistry::lambda::<User>())
                .where_filter::<UserWhereFilter>()
                .build()?,
        );

    let schema = register_scalars(Schema::build("Query", None, None))
        .register(user)
        .register(group)
        .register(membership)
        .register(UserWhereFilter::input_object())
        .register(GroupWhereFilter::input_object())
        .register(MembershipWhereFilter::input_object())
        .register(query)
        .data(loaders)
        .finish()?;

    Ok(schema)
}

fn populate_test_data() -> Result<LoaderRegistry> {
    let now = Utc::now();
    let users = InMemoryLoader::<User>::new();
    let groups = InMemoryLoader::<Group>::new();
    let memberships = InMemoryLoader::<Membership>::new();

    let mut people = Vec::new();
    for (name, surname) in [("John", "Newbie"), ("Julia", "Newbie"), ("Jan", "Novak")] {
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            surname: surname.to_string(),
            lastchange: now,
        };
        users.insert(user.clone())?;
        people.push(user);
    }
    let admin = people[0].id;

    let university = Group {
        id: Uuid::new_v4(),
        name: "Univerzita".to_string(),
        name_en: "University".to_string(),
        lastchange: now,
        mastergroup_id: None,
        created_by: Some(admin),
        changedby: None,
    };
    let faculty = Group {
        id: Uuid::new_v4(),
        name: "Fakulta vojenských technologií".to_string(),
        name_en: "Faculty of Military Technology".to_string(),
        lastchange: now,
        mastergroup_id: Some(university.id),
        created_by: Some(admin),
        changedby: Some(people[1].id),
    };
    let department = Group {
        id: Uuid::new_v4(),
        name: "Katedra informatiky".to_string(),
        name_en: "Department of Informatics".to_string(),
        lastchange: now,
        mastergroup_id: Some(faculty.id),
        created_by: Some(admin),
        changedby: None,
    };

    for group in [&university, &faculty, &department] {
        groups.insert(group.clone())?;
    }
    for (user, group) in [
        (&people[0], &university),
        (&people[1], &faculty),
        (&people[2], &department),
        (&people[2], &faculty),
    ] {
        memberships.insert(Membership {
            id: Uuid::new_v4(),
            lastchange: now,
            user_id: user.id,
            group_id: group.id,
        })?;
    }

    tracing::info!(
        users = users.len()?,
        groups = groups.len()?,
        memberships = memberships.len()?,
        "Populated test data"
    );

    Ok(LoaderRegistry::new()
        .with::<User>(users.shared())
        .with::<Group>(groups.shared())
        .with::<Membership>(memberships.shared()))
}
