//! Integration tests for the file-writing driver and directory batch mode.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;

use querygen_core::{Error, Framework, GeneratorConfig, generate_dir, generate_file};
use tempfile::TempDir;

const FLAT: &str = r#"[
  {
    "name": "getUsers",
    "url": "/users",
    "request": { "query!": { "limit!": "number", "offset!": "number" } },
    "response": { "data!": { "users!": [{ "id!": "string", "name!": "string", "age": "number" }] } }
  },
  {
    "name": "getUser",
    "url": "/users/:id",
    "request": { "query": { "limit!": "number" }, "params": { "id!": "string" } },
    "response": { "data!": { "user!": { "id!": "string" } } }
  },
  {
    "name": "createUser",
    "method": "post",
    "url": "/users",
    "request": { "body!": { "name!": "string" } }
  }
]"#;

const SPLIT: &str = r#"{
  "types": {
    "User": { "id!": "string", "name": "string" },
    "Users": ["User"]
  },
  "apis": [
    { "name": "listUsers", "url": "/users", "response": "Users" },
    {
      "name": "deleteUser",
      "method": "DELETE",
      "url": "/users/:id",
      "request": { "path!": { "id!": "string" } }
    }
  ]
}"#;

const PETSTORE: &str = r#"
openapi: 3.0.0
info: { title: Petstore, version: 1.0.0 }
paths:
  /pets:
    get:
      operationId: listPets
      parameters:
        - { name: limit, in: query, schema: { type: integer } }
      responses:
        200:
          description: pets
          content:
            application/json:
              schema:
                type: array
                items: { $ref: '#/components/schemas/Pet' }
    post:
      operationId: createPet
      requestBody:
        required: true
        content:
          application/json:
            schema: { $ref: '#/components/schemas/Pet' }
      responses:
        "201": { description: created }
components:
  schemas:
    Pet:
      type: object
      required: [id, name]
      properties:
        id: { type: integer }
        name: { type: string }
"#;

fn config(framework: Framework) -> GeneratorConfig {
    GeneratorConfig::new("./utils/fetcher#apiFetcher".parse().unwrap(), framework)
}

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_flat_schema_generates_module() {
    let dir = TempDir::new().unwrap();
    let schema = write(dir.path(), "api.json", FLAT);
    let output = dir.path().join("out").join("api.generated.ts");

    assert!(generate_file(&schema, &output, &config(Framework::React)).unwrap());
    let code = fs::read_to_string(&output).unwrap();

    assert!(code.starts_with(
        "import { apiFetcher as fetcher } from \"./utils/fetcher\";\nimport * as reactQuery from \"@tanstack/react-query\";\n\n"
    ));
    assert!(code.contains(
        "export interface GetUsersRequest {\n  query: {\n    limit: number;\n    offset: number;\n  };\n  body: undefined;\n  params: undefined;\n}\n"
    ));
    assert!(code.contains(
        "export interface GetUserRequest {\n  query?: {\n    limit: number;\n  };\n  body: undefined;\n  params?: {\n    id: string;\n  };\n}\n"
    ));
    assert!(code.contains("export type GetUsersResponse = {\n  data: {\n    users: {\n"));
    assert!(code.contains("      age?: number;\n    }[];\n"));
    assert!(code.contains("    queryKey: [\"getUsers\", JSON.stringify(request)],\n"));
    assert!(code.contains(
        "export function useCreateUserMutation(request: CreateUserRequest, options?: reactQuery.MutationOptions<any>) {\n"
    ));
    assert!(code.contains("    mutationKey: [\"createUser\"],\n"));
    assert!(code.contains("      method: \"POST\",\n"));
    assert!(!dir.path().join("out").join("api.typed.ts").exists());
}

#[test]
fn test_empty_schema_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let schema = write(dir.path(), "empty.json", "[]");
    let output = dir.path().join("out").join("empty.generated.ts");

    assert!(!generate_file(&schema, &output, &config(Framework::React)).unwrap());
    assert!(!output.exists());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_split_schema_emits_named_types_first() {
    let dir = TempDir::new().unwrap();
    let schema = write(dir.path(), "users.json", SPLIT);
    let output = dir.path().join("users.generated.ts");

    generate_file(&schema, &output, &config(Framework::Vue)).unwrap();
    let code = fs::read_to_string(&output).unwrap();

    let user = code
        .find("export interface User {\n  id: string;\n  name?: string;\n}\n")
        .unwrap();
    let users = code.find("export type Users = User[];\n").unwrap();
    let first_op = code.find("export type ListUsersResponse = Users;\n").unwrap();
    assert!(user < users && users < first_op);

    assert!(code.contains("import * as vueQuery from \"@tanstack/vue-query\";\n"));
    assert!(code.contains("  path: {\n    id: string;\n  };\n"));
    assert!(code.contains("      url: getUrl(\"/users/:id\", request.path),\n"));
    assert!(code.contains("      method: \"DELETE\",\n"));
    assert!(code.contains("export function useDeleteUserMutation("));
}

#[test]
fn test_openapi_writes_declarations_beside_module() {
    let dir = TempDir::new().unwrap();
    let schema = write(dir.path(), "petstore.yaml", PETSTORE);
    let output = dir.path().join("petstore.generated.ts");

    generate_file(&schema, &output, &config(Framework::React)).unwrap();
    let code = fs::read_to_string(&output).unwrap();
    let typed = fs::read_to_string(dir.path().join("petstore.typed.ts")).unwrap();

    assert!(code.contains("import { operations, components } from \"./petstore.typed\";\n"));
    assert!(code.contains("type Values<T> = T[keyof T];\n"));
    assert!(code.contains(
        "export function useListPetsQuery(request: operations['listPets']['parameters'], options?: reactQuery.QueryOptions<Values<operations['listPets']['responses'][200]['content']>>) {\n"
    ));
    assert!(code.contains(
        "export function useCreatePetMutation(request: { body: Values<NonNullable<operations['createPet']['requestBody']>['content']> }, options?: reactQuery.MutationOptions<any>) {\n"
    ));
    assert!(code.contains(
        "      method: \"GET\",\n      url: \"/pets\",\n      query: request.query,\n    }),\n"
    ));
    assert!(code.contains(
        "      method: \"POST\",\n      url: \"/pets\",\n      body: request.body,\n    }),\n"
    ));
    assert!(!code.contains("request.path"));

    assert!(typed.contains("export interface paths {\n"));
    assert!(typed.contains("    Pet: {\n      id: number;\n      name: string;\n    };\n"));
    assert!(typed.contains(
        "          \"application/json\": components[\"schemas\"][\"Pet\"][];\n"
    ));
}

#[test]
fn test_missing_operation_id_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let schema = write(
        dir.path(),
        "broken.yml",
        "openapi: 3.0.0\npaths:\n  /pets:\n    get:\n      responses: {}\n",
    );
    let output = dir.path().join("broken.generated.ts");

    let err = generate_file(&schema, &output, &config(Framework::React)).unwrap_err();
    assert!(err.to_string().ends_with("Operation get /pets has no operationId"));
    assert!(matches!(err, Error::InFile { .. }));
    assert!(!output.exists());
    assert!(!dir.path().join("broken.typed.ts").exists());
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let schema = write(dir.path(), "api.txt", FLAT);
    let err = generate_file(&schema, &dir.path().join("api.generated.ts"), &config(Framework::React))
        .unwrap_err();
    assert!(err.to_string().contains("Unsupported schema file extension"));
}

#[test]
fn test_batch_generates_top_level_schemas_only() {
    let schemas = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(schemas.path(), "users.json", FLAT);
    write(schemas.path(), "petstore.yaml", PETSTORE);
    write(schemas.path(), "empty.json", "[]");
    write(schemas.path(), "README.md", "# not a schema");
    fs::create_dir(schemas.path().join("nested")).unwrap();
    write(&schemas.path().join("nested"), "inner.json", FLAT);

    let output_dir = out.path().join("generated");
    let mut written = generate_dir(schemas.path(), &output_dir, &config(Framework::React)).unwrap();
    written.sort();

    assert_eq!(
        written,
        vec![
            output_dir.join("petstore.generated.ts"),
            output_dir.join("users.generated.ts"),
        ]
    );
    assert!(output_dir.join("petstore.typed.ts").exists());
    assert!(!output_dir.join("empty.generated.ts").exists());
    assert!(!output_dir.join("inner.generated.ts").exists());
}

#[test]
fn test_batch_reports_failures_and_keeps_good_output() {
    let schemas = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(schemas.path(), "good.json", FLAT);
    write(schemas.path(), "bad.json", r#"[{ "name": "x", "url": "/x", "response": 5 }]"#);

    let err = generate_dir(schemas.path(), out.path(), &config(Framework::React)).unwrap_err();
    let Error::Batch(failures) = &err else {
        panic!("expected batch error, got {err}");
    };
    assert_eq!(failures.len(), 1);
    assert!(err.to_string().contains("bad.json: Invalid schema at 'x.response'"));
    assert!(out.path().join("good.generated.ts").exists());
}

#[test]
fn test_batch_rejects_non_directory() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "api.json", FLAT);
    let err = generate_dir(&file, dir.path(), &config(Framework::React)).unwrap_err();
    assert!(matches!(err, Error::NotADirectory(_)));
}

#[test]
fn test_batch_reports_module_collision() {
    let schemas = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(schemas.path(), "api.json", FLAT);
    write(schemas.path(), "api.yaml", PETSTORE);

    let err = generate_dir(schemas.path(), out.path(), &config(Framework::React)).unwrap_err();
    let Error::Batch(failures) = &err else {
        panic!("expected batch error, got {err}");
    };
    assert_eq!(failures.len(), 1);
    assert!(matches!(&failures[0], Error::OutputCollision { .. }));
    assert!(err.to_string().contains("both generate api.generated.ts"));

    let code = fs::read_to_string(out.path().join("api.generated.ts")).unwrap();
    assert!(code.contains("export function useGetUsersQuery("));
    assert!(!out.path().join("api.typed.ts").exists());
}

#[cfg(unix)]
#[test]
fn test_batch_reports_unreadable_entries() {
    let schemas = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(schemas.path(), "users.json", FLAT);
    std::os::unix::fs::symlink(
        schemas.path().join("missing.json"),
        schemas.path().join("dangling.json"),
    )
    .unwrap();

    let err = generate_dir(schemas.path(), out.path(), &config(Framework::React)).unwrap_err();
    let Error::Batch(failures) = &err else {
        panic!("expected batch error, got {err}");
    };
    assert_eq!(failures.len(), 1);
    assert!(matches!(&failures[0], Error::Walk(_)));
    assert!(err.to_string().contains("dangling.json"));
    assert!(out.path().join("users.generated.ts").exists());
}

#[test]
fn test_reserved_word_operation_names() {
    let dir = TempDir::new().unwrap();
    let schema = write(
        dir.path(),
        "words.json",
        r#"[
  { "name": "delete", "method": "delete", "url": "/items/:id", "request": { "params!": { "id!": "string" } } },
  { "name": "new", "url": "/items/new" }
]"#,
    );
    let output = dir.path().join("words.generated.ts");

    generate_file(&schema, &output, &config(Framework::React)).unwrap();
    let code = fs::read_to_string(&output).unwrap();
    assert!(code.contains("export interface DeleteRequest {\n"));
    assert!(code.contains(
        "export function useDeleteMutation(request: DeleteRequest, options?: reactQuery.MutationOptions<any>) {\n"
    ));
    assert!(code.contains("export function useNewQuery(options?: reactQuery.QueryOptions<any>) {\n"));
    assert!(!code.contains("use_"));
}

#[test]
fn test_names_mapping_to_one_accessor_are_rejected() {
    let dir = TempDir::new().unwrap();
    let schema = write(
        dir.path(),
        "items.json",
        r#"[{ "name": "list-items", "url": "/a" }, { "name": "listItems", "url": "/b" }]"#,
    );
    let output = dir.path().join("items.generated.ts");

    let err = generate_file(&schema, &output, &config(Framework::React)).unwrap_err();
    assert!(err.to_string().contains("Duplicate operation name 'listItems'"));
    assert!(!output.exists());
}
