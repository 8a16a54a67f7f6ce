use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use am_reflect::Resource;
use am_reflect::derive::{Resource, TypePath};
use serde_json::{Value, json};

use crate::{ConventionResolver, DeclarationError, KeyCase, Mapper, MapperBuilder, MapperError};
use crate::{MapperRegistry, MapperRegistryArc, Relation, RenderOptions, Renderers, ResolutionError};

// -----------------------------------------------------------------------------
// Resources

#[derive(Resource)]
struct Friend {
    id: String,
    name: String,
    #[resource(association)]
    friend: Option<Box<Friend>>,
}

#[derive(Resource)]
struct User {
    id: String,
    name: String,
    #[resource(association)]
    friend: Option<Friend>,
}

fn user(friend: Option<Friend>) -> User {
    User {
        id: "123".into(),
        name: "Michael".into(),
        friend,
    }
}

fn nicolas() -> Friend {
    Friend {
        id: "124".into(),
        name: "Nicolas".into(),
        friend: None,
    }
}

// -----------------------------------------------------------------------------
// Mappers

macro_rules! mapper {
    ($name:ident, $path:literal, |$m:ident| $body:expr) => {
        #[derive(TypePath)]
        #[resource(type_path = $path)]
        struct $name;

        impl Mapper for $name {
            fn declare($m: &mut MapperBuilder<'_>) {
                $body;
            }
        }
    };
}

mapper!(UserMapper, "app::UserMapper", |m| m
    .attributes(&["id"])
    .each(|_| json!({ "lol": "lol" }))
    .each(|_| json!({ "lola": "lola" })));

mapper!(FriendMapper, "app::FriendMapper", |m| m.attributes(&["name"]));

mapper!(FriendShipMapper, "app::FriendShipMapper", |m| m
    .attributes(&["name"])
    .relation("friend"));

mapper!(BusinessSectorMapper, "app::BusinessSectorMapper", |m| m.relation(
    Relation::new("children").mapper::<BusinessSectorMapper>()
));

mapper!(ProfileMapper, "app::ProfileMapper", |m| m.delegate(&["name"], "friend"));

mapper!(RootLessMapper, "app::RootLessMapper", |m| m.attributes(&["name"]));

mapper!(CamelKeyMapper, "app::actives_test::CamelKeyMapper", |m| m
    .attributes(&["name"]));

mapper!(EmptyMapper, "app::EmptyMapper", |_m| ());

fn registry() -> MapperRegistry {
    MapperRegistry::new()
}

// -----------------------------------------------------------------------------
// Rendering

#[test]
fn can_render_a_list_of_resources() {
    let mut registry = registry();
    registry.register::<UserMapper>().unwrap();

    let users: Vec<User> = (0..5).map(|_| user(None)).collect();
    let mapped = UserMapper::with(&registry, &users, &RenderOptions::new()).unwrap();

    assert_eq!(mapped["users"].as_array().map(Vec::len), Some(5));
    assert_eq!(mapped["users"][0]["id"], "123");
}

#[test]
fn can_render_a_single_resource() {
    let mut registry = registry();
    registry.register::<UserMapper>().unwrap();

    let mapped = UserMapper::with(&registry, &user(None), &RenderOptions::new()).unwrap();
    assert_eq!(mapped, json!({ "user": { "id": "123", "lol": "lol", "lola": "lola" } }));
}

#[test]
fn later_renderers_win_on_conflict() {
    mapper!(ConflictMapper, "app::ConflictMapper", |m| m
        .attributes(&["id", "name"])
        .each(|_| json!({ "id": "overridden" })));

    let mut registry = registry();
    registry.register::<ConflictMapper>().unwrap();

    let mapped = ConflictMapper::render_one(&registry, &user(None)).unwrap();
    assert_eq!(mapped, json!({ "id": "overridden", "name": "Michael" }));
    let keys: Vec<_> = mapped.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["id", "name"]);
}

#[test]
fn relation_can_query_other_mapper() {
    let mut registry = registry();
    registry.register::<FriendMapper>().unwrap();
    registry.register::<FriendShipMapper>().unwrap();

    let michael = user(Some(nicolas()));
    let options = RenderOptions::new().root("user");
    let mapped = FriendShipMapper::with(&registry, &michael, &options).unwrap();

    assert_eq!(
        mapped,
        json!({ "user": { "name": "Michael", "friend": { "name": "Nicolas" } } })
    );
}

#[test]
fn relation_to_a_missing_value_is_null() {
    let mut registry = registry();
    registry.register::<FriendMapper>().unwrap();
    registry.register::<FriendShipMapper>().unwrap();

    let mapped = FriendShipMapper::render_one(&registry, &user(None)).unwrap();
    assert_eq!(mapped, json!({ "name": "Michael", "friend": null }));
}

#[test]
fn inferred_relation_without_mapper_is_a_lookup_failure() {
    let mut registry = registry();
    registry.register::<FriendShipMapper>().unwrap();

    let err = FriendShipMapper::render_one(&registry, &user(Some(nicolas()))).unwrap_err();
    assert_eq!(
        err,
        MapperError::Resolution(ResolutionError::MapperNotFound {
            path: "app::FriendMapper".into()
        })
    );
}

#[test]
fn relation_on_a_plain_field_is_undefined() {
    mapper!(BrokenMapper, "app::BrokenMapper", |m| m.relation("name"));

    let mut registry = registry();
    registry.register::<BrokenMapper>().unwrap();

    let err = BrokenMapper::render_one(&registry, &user(None)).unwrap_err();
    assert_eq!(
        err,
        MapperError::Declaration(DeclarationError::UndefinedRelation {
            mapper: "app::BrokenMapper".into(),
            key: "name".into(),
        })
    );
}

#[test]
fn relation_target_must_be_a_mapper() {
    mapper!(NamedMapper, "app::NamedMapper", |m| m.relation(
        Relation::new("friend").mapper_named("app::Friend")
    ));

    let mut registry = registry();
    registry.register::<NamedMapper>().unwrap();

    let err = NamedMapper::render_one(&registry, &user(Some(nicolas()))).unwrap_err();
    assert_eq!(
        err,
        MapperError::Declaration(DeclarationError::NotAMapper {
            mapper: "app::NamedMapper".into(),
            target: "app::Friend".into(),
        })
    );
}

#[test]
fn relation_with_named_mapper_and_optional_path() {
    mapper!(BestFriendMapper, "app::BestFriendMapper", |m| m.relation(
        Relation::new("best_friend")
            .mapper_named("app::FriendMapper")
            .optional_path("friend.friend")
    ));

    let mut registry = registry();
    registry.register::<FriendMapper>().unwrap();
    registry.register::<BestFriendMapper>().unwrap();

    let mut friend = nicolas();
    friend.friend = Some(Box::new(Friend {
        id: "125".into(),
        name: "Julie".into(),
        friend: None,
    }));
    let mapped = BestFriendMapper::render_one(&registry, &user(Some(friend))).unwrap();
    assert_eq!(mapped, json!({ "bestFriend": { "name": "Julie" } }));

    // Broken link on the way.
    let mapped = BestFriendMapper::render_one(&registry, &user(None)).unwrap();
    assert_eq!(mapped, json!({ "bestFriend": null }));
}

#[test]
fn relation_infers_mapper_through_optional_path() {
    mapper!(InferredBestFriendMapper, "app::InferredBestFriendMapper", |m| m.relation(
        Relation::new("best_friend").optional_path("friend.friend")
    ));

    let mut registry = registry();
    registry.register::<FriendMapper>().unwrap();
    registry.register::<InferredBestFriendMapper>().unwrap();

    let mut friend = nicolas();
    friend.friend = Some(Box::new(Friend {
        id: "125".into(),
        name: "Julie".into(),
        friend: None,
    }));
    let mapped = InferredBestFriendMapper::render_one(&registry, &user(Some(friend))).unwrap();
    assert_eq!(mapped, json!({ "bestFriend": { "name": "Julie" } }));

    // No owner to reflect on.
    let mapped = InferredBestFriendMapper::render_one(&registry, &user(None)).unwrap();
    assert_eq!(mapped, json!({ "bestFriend": null }));
}

#[test]
fn relation_renders_collections() {
    #[derive(Resource)]
    struct Club {
        #[resource(association)]
        members: Vec<Friend>,
    }

    mapper!(ClubMapper, "app::ClubMapper", |m| m.relation("members"));

    let mut registry = registry();
    registry.register::<FriendMapper>().unwrap();
    registry.register::<ClubMapper>().unwrap();

    let club = Club {
        members: vec![nicolas(), nicolas()],
    };
    let mapped = ClubMapper::render_one(&registry, &club).unwrap();
    assert_eq!(
        mapped,
        json!({ "members": [{ "name": "Nicolas" }, { "name": "Nicolas" }] })
    );
}

#[test]
fn self_referencing_mapper() {
    #[derive(Resource)]
    struct Sector {
        name: String,
        children: Vec<Sector>,
    }

    let mut registry = registry();
    registry.register::<BusinessSectorMapper>().unwrap();

    let sector = Sector {
        name: "root".into(),
        children: vec![Sector {
            name: "leaf".into(),
            children: vec![],
        }],
    };
    let mapped = BusinessSectorMapper::render_one(&registry, &sector).unwrap();
    assert_eq!(mapped, json!({ "children": [{ "children": [] }] }));
}

#[test]
fn mapper_called_with_nil_returns_nil() {
    let mut registry = registry();
    registry.register::<BusinessSectorMapper>().unwrap();

    let nothing: Option<User> = None;
    let rooted = BusinessSectorMapper::with(&registry, &nothing, &RenderOptions::new());
    assert_eq!(rooted, Ok(Value::Null));

    let rootless = RenderOptions::new().rootless();
    let mapped = BusinessSectorMapper::with(&registry, &nothing, &rootless);
    assert_eq!(mapped, Ok(Value::Null));
}

#[test]
fn delegate_can_remap_attributes() {
    let mut registry = registry();
    registry.register::<ProfileMapper>().unwrap();

    let options = RenderOptions::new().root("user");
    let mapped = ProfileMapper::with(&registry, &user(Some(nicolas())), &options).unwrap();
    assert_eq!(mapped, json!({ "user": { "name": "Nicolas" } }));

    let mapped = ProfileMapper::with(&registry, &user(None), &options).unwrap();
    assert_eq!(mapped, json!({ "user": { "name": null } }));
}

#[test]
fn invalid_delegate_path_discards_the_mapper() {
    mapper!(BadPathMapper, "app::BadPathMapper", |m| m
        .attributes(&["id"])
        .delegate(&["name"], "friend..name"));

    let mut registry = registry();
    let err = registry.register::<BadPathMapper>().unwrap_err();
    assert!(matches!(
        err,
        DeclarationError::InvalidPath { ref path, .. } if path == "friend..name"
    ));
    assert!(!registry.contains::<BadPathMapper>());
    assert!(registry.get_by_path("app::BadPathMapper").is_none());
}

#[test]
fn rootless_can_remove_root() {
    let mut registry = registry();
    registry.register::<RootLessMapper>().unwrap();

    let options = RenderOptions::new().rootless();
    let mapped = RootLessMapper::with(&registry, &user(None), &options).unwrap();
    assert_eq!(mapped, json!({ "name": "Michael" }));
}

#[test]
fn root_keys_are_correctly_camelized() {
    let mut registry = registry();
    registry.register::<CamelKeyMapper>().unwrap();

    let users = vec![user(None)];
    let mapped = CamelKeyMapper::with(&registry, &users, &RenderOptions::new()).unwrap();
    assert!(mapped["activesTest/CamelKeys"].is_array());

    let mapped = CamelKeyMapper::with(&registry, &user(None), &RenderOptions::new()).unwrap();
    assert_eq!(mapped["activesTest/CamelKey"]["name"], "Michael");
}

#[test]
fn explicit_root_is_inflected() {
    let mut registry = registry();
    registry.register::<RootLessMapper>().unwrap();

    let users = vec![user(None), user(None), user(None)];
    let options = RenderOptions::new().root("person");
    let mapped = RootLessMapper::with(&registry, &users, &options).unwrap();

    let object = mapped.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(object["people"].as_array().map(Vec::len), Some(3));

    let options = RenderOptions::new().root("people");
    let mapped = RootLessMapper::with(&registry, &user(None), &options).unwrap();
    assert_eq!(mapped, json!({ "person": { "name": "Michael" } }));
}

#[test]
fn mapper_raises_nothing_when_nothing_is_declared() {
    let mut registry = registry();
    let id = registry.register::<EmptyMapper>().unwrap();
    assert!(matches!(registry.renderers_for(id), Some(Renderers::Empty)));

    let options = RenderOptions::new().rootless();
    let one = vec![user(None)];
    assert_eq!(EmptyMapper::with(&registry, &one, &options), Ok(json!([{}])));

    let three = vec![user(None), user(None), user(None)];
    assert_eq!(EmptyMapper::with(&registry, &three, &options), Ok(json!([{}, {}, {}])));
}

#[test]
fn collections_drop_nil_elements() {
    let mut registry = registry();
    registry.register::<RootLessMapper>().unwrap();

    let users = vec![Some(user(None)), None, Some(user(None))];
    let mapped = RootLessMapper::render_many(&registry, &users).unwrap();
    assert_eq!(mapped, json!([{ "name": "Michael" }, { "name": "Michael" }]));
}

#[test]
fn unregistered_mapper_is_an_error() {
    let registry = registry();
    let err = UserMapper::with(&registry, &user(None), &RenderOptions::new()).unwrap_err();
    assert_eq!(
        err,
        MapperError::Declaration(DeclarationError::Unregistered {
            mapper: "app::UserMapper".into()
        })
    );
}

#[test]
fn output_keys_are_camelized_recursively() {
    mapper!(NestedMapper, "app::NestedMapper", |m| m.each(|_| json!({
        "first_name": "Nathan",
        "emails": [{ "email_professional": "nathan@fidme.com" }],
        "password_history": [{ "passwords": { "first_password": "qwerty" } }],
    })));

    let mut registry = registry();
    registry.register::<NestedMapper>().unwrap();

    let mapped = NestedMapper::render_one(&registry, &user(None)).unwrap();
    assert_eq!(
        mapped,
        json!({
            "firstName": "Nathan",
            "emails": [{ "emailProfessional": "nathan@fidme.com" }],
            "passwordHistory": [{ "passwords": { "firstPassword": "qwerty" } }],
        })
    );
    assert_eq!(crate::key_transform::camelize_keys(mapped.clone()), mapped);
}

#[test]
fn key_case_can_be_preserved() {
    mapper!(SnakeMapper, "app::SnakeMapper", |m| m.each(|_| json!({ "first_name": "Nathan" })));

    let mut registry = registry().with_key_case(KeyCase::Preserve);
    registry.register::<SnakeMapper>().unwrap();

    let mapped = SnakeMapper::render_one(&registry, &user(None)).unwrap();
    assert_eq!(mapped, json!({ "first_name": "Nathan" }));
}

#[test]
fn each_must_produce_a_map() {
    mapper!(ScalarMapper, "app::ScalarMapper", |m| m.each(|_| json!(42)));

    let mut registry = registry();
    registry.register::<ScalarMapper>().unwrap();

    let err = ScalarMapper::render_one(&registry, &user(None)).unwrap_err();
    assert_eq!(
        err,
        MapperError::Declaration(DeclarationError::InvalidOutput {
            mapper: "app::ScalarMapper".into(),
            found: "a number",
        })
    );
}

#[test]
fn each_as_reads_concrete_types() {
    mapper!(ShoutMapper, "app::ShoutMapper", |m| m
        .each_as(|user: &User| json!({ "shout": user.name.to_uppercase() })));

    let mut registry = registry();
    registry.register::<ShoutMapper>().unwrap();

    let mapped = ShoutMapper::render_one(&registry, &user(None)).unwrap();
    assert_eq!(mapped, json!({ "shout": "MICHAEL" }));

    let mapped = ShoutMapper::render_one(&registry, &nicolas()).unwrap();
    assert_eq!(mapped, json!({}));
}

#[test]
fn documents_render_like_structs() {
    let mut registry = registry();
    registry.register::<FriendShipMapper>().unwrap();
    registry.register::<FriendMapper>().unwrap();

    let doc = json!({ "name": "Michael", "friend": { "name": "Nicolas" } });
    let mapped = RootLessMapper::render_one(&registry, &doc);
    assert!(mapped.is_err());

    registry.register::<RootLessMapper>().unwrap();
    let mapped = RootLessMapper::render_one(&registry, &doc).unwrap();
    assert_eq!(mapped, json!({ "name": "Michael" }));

    // Documents carry no association reflection.
    let err = FriendShipMapper::render_one(&registry, &doc).unwrap_err();
    assert!(matches!(
        err,
        MapperError::Declaration(DeclarationError::UndefinedRelation { .. })
    ));
}

// -----------------------------------------------------------------------------
// Scopes

mapper!(AccountMapper, "app::AccountMapper", |m| m
    .attributes(&["id"])
    .scope(&["admin", "owner"], |s| {
        s.attributes(&["name"]);
    })
    .each(|_| json!({ "late": true })));

#[test]
fn scope_extends_a_copy_of_the_base() {
    let mut registry = registry();
    registry.register::<AccountMapper>().unwrap();

    let base = AccountMapper::render_one(&registry, &user(None)).unwrap();
    assert_eq!(base, json!({ "id": "123", "late": true }));

    let options = RenderOptions::new().scope("admin");
    let scoped = AccountMapper::with(&registry, &user(None), &options).unwrap();
    assert_eq!(scoped, json!({ "account": { "id": "123", "name": "Michael" } }));

    let options = RenderOptions::new().scope("Owner").rootless();
    let scoped = AccountMapper::with(&registry, &user(None), &options).unwrap();
    assert_eq!(scoped, json!({ "id": "123", "name": "Michael" }));
}

#[test]
fn scopes_are_registered_by_path() {
    let mut registry = registry();
    registry.register::<AccountMapper>().unwrap();

    let scope = registry.get_by_path("app::AccountMapperScopeAdmin").unwrap();
    assert_eq!(scope.root(), "account");
    assert_eq!(scope.renderers().len(), 2);

    let base = registry.get_type::<AccountMapper>().unwrap();
    let mut names: Vec<_> = base.scope_names().collect();
    names.sort_unstable();
    assert_eq!(names, ["Admin", "Owner"]);
}

#[test]
fn scope_is_independent_of_later_base_changes() {
    let mut registry = registry();
    registry.register::<AccountMapper>().unwrap();
    registry
        .extend::<AccountMapper>(|m| {
            m.attributes(&["name"]);
        })
        .unwrap();

    let options = RenderOptions::new().scope("admin").rootless();
    let scoped = AccountMapper::with(&registry, &user(None), &options).unwrap();
    assert_eq!(scoped, json!({ "id": "123", "name": "Michael" }));

    let base = AccountMapper::render_one(&registry, &user(None)).unwrap();
    assert_eq!(base, json!({ "id": "123", "late": true, "name": "Michael" }));
}

#[test]
fn failed_extend_restores_reopened_scopes() {
    let mut registry = registry();
    let id = registry.register::<AccountMapper>().unwrap();
    let base = registry.renderers_for(id).map(|r| r.len());

    let result = registry.extend::<AccountMapper>(|m| {
        m.scope(&["admin"], |s| {
            s.attributes(&["name"]);
        });
        m.delegate(&["x"], "a..b");
    });
    assert!(result.is_err());

    let scope = registry.get_by_path("app::AccountMapperScopeAdmin").unwrap();
    assert_eq!(scope.renderers().len(), 2);
    assert_eq!(registry.renderers_for(id).map(|r| r.len()), base);

    let options = RenderOptions::new().scope("admin").rootless();
    let scoped = AccountMapper::with(&registry, &user(None), &options).unwrap();
    assert_eq!(scoped, json!({ "id": "123", "name": "Michael" }));
}

#[test]
fn unknown_scope_is_an_error() {
    let mut registry = registry();
    registry.register::<AccountMapper>().unwrap();

    let options = RenderOptions::new().scope("guest");
    let err = AccountMapper::with(&registry, &user(None), &options).unwrap_err();
    assert_eq!(
        err,
        MapperError::Declaration(DeclarationError::UnknownScope {
            mapper: "app::AccountMapper".into(),
            scope: "guest".into(),
        })
    );
}

#[test]
fn scope_needs_a_name() {
    mapper!(NamelessMapper, "app::NamelessMapper", |m| m.scope(&[], |_| {}));
    mapper!(BlankMapper, "app::BlankMapper", |m| m.scope(&["admin", " "], |_| {}));

    let mut registry = registry();
    assert_eq!(
        registry.register::<NamelessMapper>(),
        Err(DeclarationError::EmptyScope {
            mapper: "app::NamelessMapper".into()
        })
    );
    assert!(registry.register::<BlankMapper>().is_err());
    assert!(registry.is_empty());
}

// -----------------------------------------------------------------------------
// Inheritance

#[test]
fn inherit_copies_the_parent_renderers() {
    mapper!(AdminMapper, "app::AdminMapper", |m| m
        .inherit::<UserMapper>()
        .attributes(&["name"]));

    let mut registry = registry();
    registry.register::<AdminMapper>().unwrap();
    assert!(registry.contains::<UserMapper>());

    let mapped = AdminMapper::render_one(&registry, &user(None)).unwrap();
    assert_eq!(
        mapped,
        json!({ "id": "123", "lol": "lol", "lola": "lola", "name": "Michael" })
    );

    // The parent does not see the child's renderers.
    let parent = UserMapper::render_one(&registry, &user(None)).unwrap();
    assert_eq!(parent, json!({ "id": "123", "lol": "lol", "lola": "lola" }));
}

#[test]
fn inherit_appends_at_the_call_position() {
    mapper!(LateParentMapper, "app::LateParentMapper", |m| m
        .each(|_| json!({ "id": "child" }))
        .inherit::<UserMapper>());
    mapper!(EarlyParentMapper, "app::EarlyParentMapper", |m| m
        .inherit::<UserMapper>()
        .each(|_| json!({ "id": "child" })));

    let mut registry = registry();
    registry.register::<LateParentMapper>().unwrap();
    registry.register::<EarlyParentMapper>().unwrap();

    let mapped = LateParentMapper::render_one(&registry, &user(None)).unwrap();
    assert_eq!(mapped["id"], "123");

    let mapped = EarlyParentMapper::render_one(&registry, &user(None)).unwrap();
    assert_eq!(mapped["id"], "child");
}

#[test]
fn cyclic_inheritance_is_rejected() {
    mapper!(ChickenMapper, "app::ChickenMapper", |m| m.inherit::<EggMapper>());
    mapper!(EggMapper, "app::EggMapper", |m| m.inherit::<ChickenMapper>());

    let mut registry = registry();
    let err = registry.register::<ChickenMapper>().unwrap_err();
    assert!(matches!(err, DeclarationError::CyclicInheritance { .. }));
    assert!(registry.is_empty());
}

// -----------------------------------------------------------------------------
// Polymorphism

#[derive(Resource)]
struct Post {
    title: String,
}

#[derive(Resource)]
struct Photo {
    url: String,
}

#[derive(Resource)]
struct Comment {
    body: String,
    commentable_type: String,
    commentable: Box<dyn Resource>,
}

mapper!(PostMapper, "app::PostMapper", |m| m.attributes(&["title"]));
mapper!(CommentMapper, "app::CommentMapper", |m| m
    .attributes(&["body"])
    .polymorphic("commentable"));

#[test]
fn polymorphic_resolves_from_the_discriminator() {
    let mut registry = registry();
    registry.register::<PostMapper>().unwrap();
    registry.register::<CommentMapper>().unwrap();

    let comment = Comment {
        body: "first".into(),
        commentable_type: "Post".into(),
        commentable: Box::new(Post {
            title: "Hello".into(),
        }),
    };
    let mapped = CommentMapper::render_one(&registry, &comment).unwrap();
    assert_eq!(mapped, json!({ "body": "first", "commentable": { "title": "Hello" } }));
}

#[test]
fn polymorphic_reports_the_raw_lookup_failure() {
    let mut registry = registry();
    registry.register::<CommentMapper>().unwrap();

    let comment = Comment {
        body: "first".into(),
        commentable_type: "Photo".into(),
        commentable: Box::new(Photo {
            url: "cat.png".into(),
        }),
    };
    let err = CommentMapper::render_one(&registry, &comment).unwrap_err();
    assert_eq!(
        err,
        MapperError::Resolution(ResolutionError::MapperNotFound {
            path: "app::PhotoMapper".into()
        })
    );
}

#[test]
fn polymorphic_ignores_same_name_in_other_module() {
    mapper!(OtherPhotoMapper, "other::PhotoMapper", |m| m.attributes(&["url"]));

    let comment = Comment {
        body: "first".into(),
        commentable_type: "Photo".into(),
        commentable: Box::new(Photo {
            url: "cat.png".into(),
        }),
    };

    let mut registry = registry();
    registry.register::<OtherPhotoMapper>().unwrap();
    registry.register::<CommentMapper>().unwrap();
    let err = CommentMapper::render_one(&registry, &comment).unwrap_err();
    assert_eq!(
        err,
        MapperError::Resolution(ResolutionError::MapperNotFound {
            path: "app::PhotoMapper".into()
        })
    );

    let mut registry =
        MapperRegistry::new().with_resolver(ConventionResolver::new().with_name_fallback());
    registry.register::<OtherPhotoMapper>().unwrap();
    registry.register::<CommentMapper>().unwrap();
    let mapped = CommentMapper::render_one(&registry, &comment).unwrap();
    assert_eq!(mapped, json!({ "body": "first", "commentable": { "url": "cat.png" } }));
}

#[test]
fn polymorphic_needs_a_discriminator() {
    mapper!(LikeMapper, "app::LikeMapper", |m| m.polymorphic("likeable"));

    let mut registry = registry();
    registry.register::<LikeMapper>().unwrap();

    let err = LikeMapper::render_one(&registry, &user(None)).unwrap_err();
    assert_eq!(
        err,
        MapperError::Resolution(ResolutionError::MissingDiscriminator {
            mapper: "app::LikeMapper".into(),
            field: "likeable_type".into(),
        })
    );
}

#[test]
fn acts_as_polymorph_renders_each_type_with_its_mapper() {
    mapper!(FeedMapper, "app::FeedMapper", |m| m.acts_as_polymorph());

    let mut registry = registry();
    registry.register::<PostMapper>().unwrap();
    registry.register::<FeedMapper>().unwrap();

    let feed: Vec<Box<dyn Resource>> = vec![Box::new(Post {
        title: "Hello".into(),
    })];
    let options = RenderOptions::new().root("item");
    let mapped = FeedMapper::with(&registry, &feed, &options).unwrap();
    assert_eq!(mapped, json!({ "items": [{ "title": "Hello" }] }));
}

#[test]
fn acts_as_polymorph_reports_a_generic_failure() {
    mapper!(FeedMapper, "app::FeedMapper", |m| m.acts_as_polymorph());

    let mut registry = registry();
    registry.register::<FeedMapper>().unwrap();

    let photo = Photo {
        url: "cat.png".into(),
    };
    let err = FeedMapper::render_one(&registry, &photo).unwrap_err();
    match err {
        MapperError::Resolution(ResolutionError::NoMapperForResource { type_path }) => {
            assert!(type_path.ends_with("::Photo"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

// -----------------------------------------------------------------------------
// Registry

#[test]
fn register_is_idempotent() {
    let mut registry = registry();
    let first = registry.register::<UserMapper>().unwrap();
    let second = registry.register::<UserMapper>().unwrap();
    assert_eq!(first, second);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get_by_name("UserMapper").map(|d| d.id()), Some(first));
}

#[test]
fn ambiguous_names_need_full_paths() {
    mapper!(AdminUserMapper, "app::admin::UserMapper", |m| m.attributes(&["name"]));

    let mut registry = registry();
    registry.register::<UserMapper>().unwrap();
    registry.register::<AdminUserMapper>().unwrap();

    assert!(registry.is_ambiguous("UserMapper"));
    assert!(registry.get_by_name("UserMapper").is_none());
    assert!(registry.get_by_path("app::admin::UserMapper").is_some());
}

#[test]
fn renderers_for_unknown_mapper() {
    let mut registry = registry();
    let id = registry.register::<UserMapper>().unwrap();

    assert_eq!(registry.renderers_for(id).map(|r| r.len()), Some(3));

    let mut other = MapperRegistry::new();
    other.register::<EmptyMapper>().unwrap();
    let unknown = other.register::<RootLessMapper>().unwrap();
    assert!(registry.renderers_for(unknown).is_none());
}

#[test]
fn add_renderer_appends() {
    let mut registry = registry();
    let id = registry.register::<EmptyMapper>().unwrap();

    registry
        .add_renderer(id, crate::renderer::FnRenderer(|_: &dyn Resource| json!({ "a": 1 })))
        .unwrap();
    let mapped = EmptyMapper::render_one(&registry, &user(None)).unwrap();
    assert_eq!(mapped, json!({ "a": 1 }));
}

#[test]
fn shared_registry_renders_across_threads() {
    let shared = MapperRegistryArc::default();
    shared.write().register::<UserMapper>().unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let shared = shared.clone();
            scope.spawn(move || {
                let registry = shared.read();
                let mapped = UserMapper::render_one(&registry, &user(None)).unwrap();
                assert_eq!(mapped["id"], "123");
            });
        }
    });
}
