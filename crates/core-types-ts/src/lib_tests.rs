use core_types::{Additional, LiteralKind, NodeDocument, ObjectType, TypeNode};
use indoc::indoc;

use crate::test_utils::{assert_round_trip, document, emit_plain, parse_plain};
use crate::{
    EmitConfig, Error, NonExported, ParseConfig, convert_core_types_to_typescript,
    convert_typescript_to_core_types,
};

fn user_document() -> NodeDocument {
    document(vec![
        (
            "User",
            TypeNode::object(
                ObjectType::new()
                    .property(
                        "name",
                        TypeNode::string()
                            .with_title("The real name")
                            .with_description("Must be a valid name, not */"),
                        true,
                    )
                    .property("nick", TypeNode::string(), false)
                    .property(
                        "roles",
                        TypeNode::array(TypeNode::reference("Role")),
                        true,
                    ),
            )
            .with_title("User type")
            .with_description("This type holds the user information, such as name")
            .with_example(r#"{ name: "Joe" }"#)
            .with_default(r#"{ name: "" }"#)
            .with_see("http://username"),
        ),
        ("Admin", TypeNode::constant("admin")),
        (
            "Role",
            TypeNode::or(vec![
                TypeNode::reference("Admin"),
                TypeNode::enumeration(LiteralKind::String, vec!["member".into(), "guest".into()]),
            ]),
        ),
        (
            "ChatLine",
            TypeNode::object(
                ObjectType::new()
                    .property("user", TypeNode::reference("User").with_title("Author"), true)
                    .property("line", TypeNode::string().with_example("Hello"), true)
                    .property(
                        "position",
                        TypeNode::tuple(
                            vec![TypeNode::number(), TypeNode::number()],
                            1,
                            Additional::Closed,
                        ),
                        true,
                    )
                    .property(
                        "meta",
                        TypeNode::object(ObjectType::new().additional(Additional::Open)),
                        false,
                    )
                    .additional(Additional::Typed(Box::new(TypeNode::or(vec![
                        TypeNode::string(),
                        TypeNode::null(),
                    ])))),
            ),
        ),
        (
            "Message",
            TypeNode::and(vec![
                TypeNode::reference("ChatLine"),
                TypeNode::object(ObjectType::new().property("id", TypeNode::number(), true)),
            ]),
        ),
        (
            "Row",
            TypeNode::tuple(
                vec![TypeNode::string()],
                1,
                Additional::Typed(Box::new(TypeNode::number())),
            ),
        ),
    ])
}

#[test]
fn round_trip() {
    let output = assert_round_trip(&user_document());

    insta::assert_snapshot!(output, @r#"
        /**
         * User type
         *
         * This type holds the user information, such as name
         *
         * @example { name: "Joe" }
         * @default { name: "" }
         * @see http://username
         */
        export interface User {
          /**
           * The real name
           *
           * Must be a valid name, not *\/
           */
          name: string;
          nick?: string;
          roles: Role[];
        }

        export type Admin = "admin";

        export type Role = "admin" | "member" | "guest";

        export interface ChatLine {
          /** Author */
          user: User;
          /**
           * @example Hello
           */
          line: string;
          position: [number, number?];
          meta?: {
            [key: string]: any;
          };
          [key: string]: string | null;
        }

        export type Message = ChatLine & {
          id: number;
        };

        export type Row = [string, ...number[]];
        "#);
}

#[test]
fn round_trip_keeps_declaration_annotations() {
    let doc = user_document();
    let back = parse_plain(&emit_plain(&doc));

    let user = back.get("User").unwrap();
    assert_eq!(user.node.annotations, doc.get("User").unwrap().node.annotations);
}

#[test]
fn type_operator_names_are_renamed() {
    let doc = document(vec![
        ("keyof", TypeNode::string()),
        ("readonly", TypeNode::number()),
        (
            "A",
            TypeNode::or(vec![
                TypeNode::reference("keyof"),
                TypeNode::reference("readonly"),
            ]),
        ),
    ]);

    let output = assert_round_trip(&doc);
    insta::assert_snapshot!(output, @r"
    export type keyof_ = string;

    export type readonly_ = number;

    export type A = keyof_ | readonly_;
    ");
}

#[test]
fn member_annotations_round_trip() {
    let doc = document(vec![
        (
            "Thingy",
            TypeNode::or(vec![
                TypeNode::reference("Thing")
                    .with_title("Thing is the preferred type")
                    .with_see("The Thing documentation"),
                TypeNode::number().with_title("Just a number"),
                TypeNode::or(vec![TypeNode::null(), TypeNode::boolean()]).with_title("Flags"),
            ])
            .with_title("Thing ref"),
        ),
        ("Thing", TypeNode::string()),
        (
            "Pair",
            TypeNode::and(vec![
                TypeNode::reference("Thing").with_description("Left side"),
                TypeNode::tuple(
                    vec![TypeNode::string().with_example("x"), TypeNode::number()],
                    2,
                    Additional::Closed,
                ),
            ]),
        ),
    ]);

    assert_round_trip(&doc);
    assert_eq!(parse_plain(&emit_plain(&doc)), doc);
}

#[test]
fn parsed_declarations_survive_emission() {
    let source = indoc! {"
        /** User type */
        export interface User {
          name: string;
          /** Optional nickname */
          nick?: string;
        }

        /** A chat line */
        export interface ChatLine {
          user: User;
          line: string;
        }
    "};

    let doc = parse_plain(source);
    assert_eq!(emit_plain(&doc), source);
}

#[test]
fn closed_by_default_and_open_when_asked() {
    let doc = parse_plain(indoc! {"
        export interface Closed { a: string }
        export interface Open { a: string; [key: string]: any }
    "});

    let closed = &doc.get("Closed").unwrap().node;
    let open = &doc.get("Open").unwrap().node;
    let additional = |node: &TypeNode| match &node.kind {
        core_types::NodeKind::Object(object) => object.additional_properties.clone(),
        _ => panic!("expected an object"),
    };
    assert_eq!(additional(closed), Additional::Closed);
    assert_eq!(additional(open), Additional::Open);
}

#[test]
fn from_json_document() {
    let json = r#"{
        "version": 1,
        "types": [
            {
                "name": "Point",
                "type": "object",
                "title": "A point",
                "properties": {
                    "x": { "node": { "type": "number" }, "required": true },
                    "y": { "node": { "type": "number" }, "required": false }
                },
                "additionalProperties": false
            },
            {
                "name": "Color",
                "type": "string",
                "enum": ["red", "green"]
            }
        ]
    }"#;

    let doc = NodeDocument::from_json(json).unwrap();
    insta::assert_snapshot!(emit_plain(&doc), @r#"
        /** A point */
        export interface Point {
          x: number;
          y?: number;
        }

        export type Color = "red" | "green";
        "#);
}

#[test]
fn conversion_reports_converted_names() {
    let doc = document(vec![("my-type", TypeNode::string()), ("Other", TypeNode::number())]);
    let result = convert_core_types_to_typescript(&doc, &EmitConfig::new()).unwrap();

    assert_eq!(result.converted, ["my_type", "Other"]);
    assert!(result.not_converted.is_empty());
}

#[test]
fn conversion_reports_skipped_declarations() {
    let source = indoc! {"
        export type A = B;
        type B = string;
        type C = number;
    "};
    let config = ParseConfig::new().non_exported(NonExported::IncludeIfReferenced);
    let result = convert_typescript_to_core_types(source, &config).unwrap();

    assert_eq!(result.converted, ["A", "B"]);
    assert_eq!(result.not_converted, ["C"]);
}

#[test]
fn dangling_reference_from_parse_fails_on_emit() {
    let doc = parse_plain("export type A = Missing;");
    let err = convert_core_types_to_typescript(&doc, &EmitConfig::new()).unwrap_err();

    assert_eq!(
        err,
        Error::UnresolvedReference {
            name: "Missing".to_string(),
            path: "A".to_string(),
        }
    );
}

#[test]
fn use_unknown_reads_back_as_any() {
    let doc = document(vec![(
        "Bag",
        TypeNode::object(ObjectType::new().additional(Additional::Open)),
    )]);
    let config = EmitConfig::new()
        .use_unknown(true)
        .no_descriptive_header(true);
    let output = convert_core_types_to_typescript(&doc, &config).unwrap().data;

    assert_eq!(output, "export interface Bag {\n  [key: string]: unknown;\n}\n");
    assert_eq!(parse_plain(&output), doc);
}

#[test]
fn header_is_skipped_when_parsing() {
    let doc = document(vec![("foo", TypeNode::string())]);
    let output = convert_core_types_to_typescript(&doc, &EmitConfig::new())
        .unwrap()
        .data;

    assert!(output.starts_with("// This file is generated by core-types-ts"));
    assert_eq!(parse_plain(&output), doc);
}
