use core_types::{Additional, LiteralKind, NodeDocument, ObjectType, TypeNode};

use crate::test_utils::{document, emit_plain};
use crate::{EmitConfig, Error};

fn emit(doc: &NodeDocument, config: &EmitConfig) -> String {
    super::emit(doc, config).unwrap().text
}

fn emit_err(doc: &NodeDocument) -> Error {
    super::emit(doc, &EmitConfig::new()).unwrap_err()
}

#[test]
fn simple_type_with_header() {
    let doc = document(vec![("foo", TypeNode::string())]);
    let output = emit(&doc, &EmitConfig::default());

    insta::assert_snapshot!(output, @r"
        // This file is generated by core-types-ts, DO NOT EDIT.
        // For more information, see:
        //  - https://github.com/grantila/core-types-ts

        export type foo = string;
        ");
}

#[test]
fn header_with_user_package() {
    let doc = document(vec![("foo", TypeNode::string())]);
    let config = EmitConfig::new()
        .user_package("my-package")
        .user_package_url("https://my-user-package.com");
    let output = emit(&doc, &config);

    insta::assert_snapshot!(output, @r"
        // This file is generated by core-types-ts on behalf of my-package, DO NOT EDIT.
        // For more information, see:
        //  - https://my-user-package.com
        //  - https://github.com/grantila/core-types-ts

        export type foo = string;
        ");
}

#[test]
fn no_descriptive_header() {
    let doc = document(vec![("foo", TypeNode::string())]);
    let output = emit_plain(&doc);
    assert_eq!(output, "export type foo = string;\n");
}

#[test]
fn string_enum() {
    let doc = document(vec![(
        "foo",
        TypeNode::enumeration(
            LiteralKind::String,
            vec!["foo".into(), "bar".into(), "baz".into()],
        ),
    )]);

    insta::assert_snapshot!(emit_plain(&doc), @r#"export type foo = "foo" | "bar" | "baz";"#);
}

#[test]
fn string_union_of_separate_types_is_flattened() {
    let doc = document(vec![
        ("bar", TypeNode::constant("bar")),
        (
            "foo",
            TypeNode::or(vec![
                TypeNode::reference("bar"),
                TypeNode::enumeration(LiteralKind::String, vec!["foo".into(), "baz".into()]),
            ]),
        ),
    ]);

    insta::assert_snapshot!(emit_plain(&doc), @r#"
        export type bar = "bar";

        export type foo = "bar" | "foo" | "baz";
        "#);
}

#[test]
fn union_with_non_string_member_is_not_flattened() {
    let doc = document(vec![
        ("bar", TypeNode::constant("bar")),
        (
            "foo",
            TypeNode::or(vec![TypeNode::reference("bar"), TypeNode::number()]),
        ),
    ]);

    insta::assert_snapshot!(emit_plain(&doc), @r#"
        export type bar = "bar";

        export type foo = bar | number;
        "#);
}

#[test]
fn complex_object() {
    let doc = document(vec![
        (
            "foo",
            TypeNode::object(
                ObjectType::new()
                    .property("bar", TypeNode::string(), false)
                    .property(
                        "baz",
                        TypeNode::or(vec![
                            TypeNode::number(),
                            TypeNode::object(
                                ObjectType::new()
                                    .additional(Additional::Typed(Box::new(TypeNode::boolean()))),
                            ),
                        ]),
                        true,
                    )
                    .property(
                        "bak",
                        TypeNode::object(ObjectType::new().additional(Additional::Open)),
                        true,
                    )
                    .property(
                        "tupleWithAdditionals",
                        TypeNode::tuple(
                            vec![TypeNode::string()],
                            1,
                            Additional::Typed(Box::new(TypeNode::number())),
                        ),
                        true,
                    )
                    .property(
                        "tupleWithObjectAdditionals",
                        TypeNode::tuple(
                            vec![TypeNode::string()],
                            1,
                            Additional::Typed(Box::new(TypeNode::object(
                                ObjectType::new().property("x", TypeNode::reference("User"), false),
                            ))),
                        ),
                        true,
                    ),
            ),
        ),
        ("User", TypeNode::string()),
    ]);
    let config = EmitConfig::new()
        .no_descriptive_header(true)
        .use_unknown(true);

    insta::assert_snapshot!(emit(&doc, &config), @r"
        export interface foo {
          bar?: string;
          baz: number | {
            [key: string]: boolean;
          };
          bak: {
            [key: string]: unknown;
          };
          tupleWithAdditionals: [string, ...number[]];
          tupleWithObjectAdditionals: [string, ...{
            x?: User;
          }[]];
        }

        export type User = string;
        ");
}

#[test]
fn declaration_comments() {
    let doc = document(vec![
        (
            "User",
            TypeNode::object(ObjectType::new().property(
                "name",
                TypeNode::string().with_title("The real name"),
                true,
            ))
            .with_title("User type")
            .with_description("This type holds the user information, such as name"),
        ),
        (
            "ChatLine",
            TypeNode::object(
                ObjectType::new()
                    .property("user", TypeNode::reference("User"), true)
                    .property("line", TypeNode::string(), true),
            )
            .with_title("A chat line"),
        ),
    ]);

    insta::assert_snapshot!(emit_plain(&doc), @r"
        /**
         * User type
         *
         * This type holds the user information, such as name
         */
        export interface User {
          /** The real name */
          name: string;
        }

        /** A chat line */
        export interface ChatLine {
          user: User;
          line: string;
        }
        ");
}

#[test]
fn all_annotation_fields() {
    let doc = document(vec![
        (
            "User",
            TypeNode::object(
                ObjectType::new().property(
                    "name",
                    TypeNode::string()
                        .with_title("The real name")
                        .with_description("Must be a valid name, not */"),
                    true,
                ),
            )
            .with_title("User type")
            .with_description("This type holds the user information, such as name")
            .with_example(r#"{ name: "Joe" }"#)
            .with_default(r#"{ user: "" }"#)
            .with_see("http://username"),
        ),
        (
            "ChatLine",
            TypeNode::object(
                ObjectType::new()
                    .property(
                        "user",
                        TypeNode::reference("User").with_title("User ref"),
                        true,
                    )
                    .property(
                        "line",
                        TypeNode::string().with_example("This is a line"),
                        true,
                    ),
            )
            .with_title("A chat line"),
        ),
        (
            "Thingy",
            TypeNode::or(vec![
                TypeNode::reference("Thing")
                    .with_title("Thing is the preferred type")
                    .with_see("The Thing documentation"),
                TypeNode::number().with_title("Just a number"),
            ])
            .with_title("Thing ref"),
        ),
        ("Thing", TypeNode::string()),
    ]);

    insta::assert_snapshot!(emit_plain(&doc), @r#"
        /**
         * User type
         *
         * This type holds the user information, such as name
         *
         * @example { name: "Joe" }
         * @default { user: "" }
         * @see http://username
         */
        export interface User {
          /**
           * The real name
           *
           * Must be a valid name, not *\/
           */
          name: string;
        }

        /** A chat line */
        export interface ChatLine {
          /** User ref */
          user: User;
          /**
           * @example This is a line
           */
          line: string;
        }

        /** Thing ref */
        export type Thingy =
          /**
           * Thing is the preferred type
           *
           * @see The Thing documentation
           */
          | Thing
          /** Just a number */
          | number;

        export type Thing = string;
        "#);
}

#[test]
fn closed_object_has_no_index_signature() {
    let doc = document(vec![(
        "Point",
        TypeNode::object(
            ObjectType::new()
                .property("x", TypeNode::number(), true)
                .property("y", TypeNode::number(), true),
        ),
    )]);

    let output = emit_plain(&doc);
    assert!(!output.contains("[key: string]"));
    insta::assert_snapshot!(output, @r"
        export interface Point {
          x: number;
          y: number;
        }
        ");
}

#[test]
fn empty_interface() {
    let doc = document(vec![("Empty", TypeNode::object(ObjectType::new()))]);
    insta::assert_snapshot!(emit_plain(&doc), @"export interface Empty {}");
}

#[test]
fn open_object_uses_top_type() {
    let doc = document(vec![(
        "Bag",
        TypeNode::object(ObjectType::new().additional(Additional::Open)),
    )]);

    insta::assert_snapshot!(emit_plain(&doc), @r"
        export interface Bag {
          [key: string]: any;
        }
        ");
}

#[test]
fn tuple_with_tail() {
    let doc = document(vec![(
        "Row",
        TypeNode::tuple(
            vec![TypeNode::string()],
            1,
            Additional::Typed(Box::new(TypeNode::number())),
        ),
    )]);

    insta::assert_snapshot!(emit_plain(&doc), @"export type Row = [string, ...number[]];");
}

#[test]
fn tuple_optional_elements_and_open_tail() {
    let doc = document(vec![(
        "Row",
        TypeNode::tuple(
            vec![TypeNode::string(), TypeNode::number(), TypeNode::boolean()],
            1,
            Additional::Open,
        ),
    )]);

    insta::assert_snapshot!(
        emit_plain(&doc),
        @"export type Row = [string, number?, boolean?, ...any[]];"
    );
}

#[test]
fn tuple_min_items_beyond_elements_with_tail() {
    let doc = document(vec![(
        "Row",
        TypeNode::tuple(
            vec![TypeNode::string()],
            3,
            Additional::Typed(Box::new(TypeNode::number())),
        ),
    )]);

    insta::assert_snapshot!(
        emit_plain(&doc),
        @"export type Row = [string, number, number, ...number[]];"
    );
}

#[test]
fn tuple_min_items_beyond_elements_closed() {
    let doc = document(vec![(
        "Row",
        TypeNode::tuple(vec![TypeNode::string()], 2, Additional::Closed),
    )]);

    let err = emit_err(&doc);
    insta::assert_snapshot!(
        err,
        @"unsupported node at Row: tuple requires 2 items but declares 1 and allows no additional items"
    );
}

#[test]
fn optional_union_tuple_element_is_parenthesized() {
    let doc = document(vec![(
        "Row",
        TypeNode::tuple(
            vec![TypeNode::or(vec![TypeNode::string(), TypeNode::null()])],
            0,
            Additional::Closed,
        ),
    )]);

    insta::assert_snapshot!(emit_plain(&doc), @"export type Row = [(string | null)?];");
}

#[test]
fn compound_types_are_parenthesized() {
    let doc = document(vec![
        ("A", TypeNode::string()),
        ("B", TypeNode::number()),
        ("C", TypeNode::object(ObjectType::new())),
        (
            "Mixed",
            TypeNode::and(vec![
                TypeNode::or(vec![TypeNode::reference("A"), TypeNode::reference("B")]),
                TypeNode::reference("C"),
            ]),
        ),
        (
            "List",
            TypeNode::array(TypeNode::or(vec![
                TypeNode::string(),
                TypeNode::number(),
            ])),
        ),
        (
            "Either",
            TypeNode::or(vec![
                TypeNode::and(vec![TypeNode::reference("A"), TypeNode::reference("C")]),
                TypeNode::null(),
            ]),
        ),
    ]);

    insta::assert_snapshot!(emit_plain(&doc), @r"
        export type A = string;

        export type B = number;

        export interface C {}

        export type Mixed = (A | B) & C;

        export type List = (string | number)[];

        export type Either = A & C | null;
        ");
}

#[test]
fn literals() {
    let doc = document(vec![
        ("Yes", TypeNode::constant(true)),
        ("Answer", TypeNode::constant(42i64)),
        (
            "Half",
            TypeNode::constant(core_types::Literal::Number(
                serde_json::Number::from_f64(0.5).unwrap(),
            )),
        ),
        (
            "Digits",
            TypeNode::enumeration(LiteralKind::Number, vec![1i64.into(), 2i64.into()]),
        ),
        ("Quote", TypeNode::constant("say \"hi\"")),
    ]);

    insta::assert_snapshot!(emit_plain(&doc), @r#"
        export type Yes = true;

        export type Answer = 42;

        export type Half = 0.5;

        export type Digits = 1 | 2;

        export type Quote = "say \"hi\"";
        "#);
}

#[test]
fn names_and_keys_are_made_valid() {
    let doc = document(vec![
        (
            "my-type",
            TypeNode::object(ObjectType::new().property("content-type", TypeNode::string(), true)),
        ),
        ("Ref", TypeNode::reference("my-type")),
    ]);

    insta::assert_snapshot!(emit_plain(&doc), @r#"
        export interface my_type {
          "content-type": string;
        }

        export type Ref = my_type;
        "#);
}

#[test]
fn documented_union_members() {
    let doc = document(vec![
        (
            "Id",
            TypeNode::or(vec![
                TypeNode::string().with_title("As text"),
                TypeNode::number(),
                TypeNode::and(vec![TypeNode::reference("A"), TypeNode::reference("B")])
                    .with_title("Both"),
            ]),
        ),
        ("A", TypeNode::object(ObjectType::new())),
        ("B", TypeNode::object(ObjectType::new())),
    ]);

    insta::assert_snapshot!(emit_plain(&doc), @r"
        export type Id =
          /** As text */
          | string
          | number
          /** Both */
          | A & B;

        export interface A {}

        export interface B {}
        ");
}

#[test]
fn documented_members_of_nested_union_stay_grouped() {
    let doc = document(vec![(
        "Id",
        TypeNode::or(vec![
            TypeNode::or(vec![TypeNode::string(), TypeNode::number()]).with_title("Scalar"),
            TypeNode::null(),
        ]),
    )]);

    insta::assert_snapshot!(emit_plain(&doc), @r"
        export type Id =
          /** Scalar */
          | (string | number)
          | null;
        ");
}

#[test]
fn documented_string_members_are_not_flattened() {
    let doc = document(vec![(
        "Mode",
        TypeNode::or(vec![
            TypeNode::constant("on").with_title("Enabled"),
            TypeNode::constant("off"),
        ]),
    )]);

    insta::assert_snapshot!(emit_plain(&doc), @r#"
        export type Mode =
          /** Enabled */
          | "on"
          | "off";
        "#);
}

#[test]
fn documented_tuple_elements() {
    let doc = document(vec![(
        "Point",
        TypeNode::object(ObjectType::new().property(
            "at",
            TypeNode::tuple(
                vec![
                    TypeNode::number().with_title("Horizontal"),
                    TypeNode::number(),
                ],
                1,
                Additional::Closed,
            ),
            true,
        )),
    )]);

    insta::assert_snapshot!(emit_plain(&doc), @r"
        export interface Point {
          at: [
            /** Horizontal */
            number,
            number?,
          ];
        }
        ");
}

#[test]
fn lone_member_and_array_item_annotations_are_not_emitted() {
    let doc = document(vec![
        ("Id", TypeNode::or(vec![TypeNode::string().with_title("As text")])),
        ("Ids", TypeNode::array(TypeNode::string().with_title("One id"))),
    ]);

    insta::assert_snapshot!(emit_plain(&doc), @r"
        export type Id = string;

        export type Ids = string[];
        ");
}

#[test]
fn expression_output() {
    let doc = document(vec![(
        "Point",
        TypeNode::object(ObjectType::new().property("x", TypeNode::number(), true)),
    )]);
    let config = EmitConfig::new()
        .declaration(false)
        .no_descriptive_header(true);

    insta::assert_snapshot!(emit(&doc, &config), @r"
        {
          x: number;
        }
        ");
}

#[test]
fn expression_output_needs_single_type() {
    let doc = document(vec![("A", TypeNode::string()), ("B", TypeNode::number())]);
    let config = EmitConfig::new().declaration(false);

    let err = super::emit(&doc, &config).unwrap_err();
    assert!(matches!(err, Error::UnsupportedNode { .. }));
}

#[test]
fn dangling_reference_fails() {
    let doc = document(vec![(
        "User",
        TypeNode::object(ObjectType::new().property(
            "name",
            TypeNode::or(vec![TypeNode::string(), TypeNode::reference("Missing")]),
            true,
        )),
    )]);

    assert_eq!(
        emit_err(&doc),
        Error::UnresolvedReference {
            name: "Missing".to_string(),
            path: "User.properties.name.or[1]".to_string(),
        }
    );
}

#[test]
fn empty_enum_is_malformed() {
    let doc = document(vec![("E", TypeNode::enumeration(LiteralKind::String, vec![]))]);
    insta::assert_snapshot!(emit_err(&doc), @"malformed literal at E: enum has no values");
}

#[test]
fn enum_value_of_wrong_kind_is_malformed() {
    let doc = document(vec![(
        "E",
        TypeNode::enumeration(LiteralKind::String, vec!["a".into(), 1i64.into()]),
    )]);
    insta::assert_snapshot!(
        emit_err(&doc),
        @"malformed literal at E.enum[1]: number value in a string enum"
    );
}

#[test]
fn duplicate_names_fail() {
    let doc = document(vec![("A", TypeNode::string()), ("A", TypeNode::number())]);
    assert_eq!(
        emit_err(&doc),
        Error::DuplicateTypeName {
            name: "A".to_string()
        }
    );
}

#[test]
fn empty_union_is_unsupported() {
    let doc = document(vec![("U", TypeNode::or(vec![]))]);
    insta::assert_snapshot!(emit_err(&doc), @"unsupported node at U: union without members");
}

#[test]
fn declared_names_are_reported() {
    let doc = document(vec![("my-type", TypeNode::string()), ("B", TypeNode::number())]);
    let emitted = super::emit(&doc, &EmitConfig::new()).unwrap();
    assert_eq!(emitted.declared, ["my_type", "B"]);
}
