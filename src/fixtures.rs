//! Built-in fixture catalog
//!
//! The literal seed data for the integration environment. Each entry pairs
//! a table schema with the items to load; catalog order is processing
//! order. Table names must be unique across the catalog.

use dynamo_seed::catalog::{
    AttributeType, FixtureSpec, ItemRecord, ProjectionMode, SecondaryIndex, TableSchema,
};

/// The fixture catalog, in processing order
pub fn catalog() -> Vec<FixtureSpec> {
    vec![
        user(),
        hello(),
        float_test(),
        empty_set_test_data_0(),
        use_default_for_null(),
        query_test_data_0(),
        scan_test_data_0(),
        project(),
    ]
}

fn user() -> FixtureSpec {
    FixtureSpec::new(TableSchema::new("user").hash_key("id", AttributeType::String))
        .with_item(
            ItemRecord::new()
                .set_string("id", "user_primary_key")
                .set_string("name", "bokuweb")
                .set_number("num_usize", 42)
                .set_number("num_u8", 255)
                .set_number("num_i8", -127)
                .set_number("option_i16", -1)
                .set_string_set("string_set", ["Hello"])
                .set_number_set("number_set", [1]),
        )
        .with_item(
            ItemRecord::new()
                .set_string("id", "id0")
                .set_string("name", "bokuweb")
                .set_number("num", 1000),
        )
}

fn hello() -> FixtureSpec {
    FixtureSpec::new(
        TableSchema::new("hello")
            .hash_key("id", AttributeType::String)
            .range_key("year", AttributeType::Number),
    )
    .with_item(
        ItemRecord::new()
            .set_string("id", "bokuweb")
            .set_number("year", 2019),
    )
    .with_item(
        ItemRecord::new()
            .set_string("id", "raiden")
            .set_number("year", 2020),
    )
}

fn float_test() -> FixtureSpec {
    FixtureSpec::new(TableSchema::new("FloatTest").hash_key("id", AttributeType::String))
        .with_item(
            ItemRecord::new()
                .set_string("id", "primary_key")
                .set_number("float32", 1.23)
                .set_number("float64", 2.34),
        )
}

fn empty_set_test_data_0() -> FixtureSpec {
    FixtureSpec::new(TableSchema::new("EmptySetTestData0").hash_key("id", AttributeType::String))
        .with_item(
            ItemRecord::new()
                .set_string("id", "id0")
                .set_number_set("nset", [2000])
                .set_string_set("sset", ["Hello"]),
        )
        .with_item(
            ItemRecord::new()
                .set_string("id", "id1")
                .set_number_set("nset", [2001])
                .set_string_set("sset", ["World"]),
        )
}

fn use_default_for_null() -> FixtureSpec {
    FixtureSpec::new(TableSchema::new("UseDefaultForNull").hash_key("id", AttributeType::String))
        .with_item(ItemRecord::new().set_string("id", "id0").set_null("flag"))
}

fn query_test_data_0() -> FixtureSpec {
    let rows: [(&str, &str, u32, u32, Option<&str>); 10] = [
        ("id0", "john", 1999, 1000, None),
        ("id0", "john", 2000, 2000, None),
        ("id1", "bob", 2003, 300, None),
        ("id2", "alice", 2013, 4000, None),
        ("id3", "bar0", 1987, 4000, None),
        ("id3", "bar1", 2000, 4000, None),
        ("id3", "bar2", 2029, 4000, None),
        ("id4", "bar0", 2029, 4000, None),
        ("id4", "bar1", 2000, 4000, Some("option2")),
        ("id4", "bob", 1999, 4000, Some("option2")),
    ];

    FixtureSpec::new(
        TableSchema::new("QueryTestData0")
            .hash_key("id", AttributeType::String)
            .range_key("year", AttributeType::Number),
    )
    .with_items(rows.into_iter().map(|(id, name, year, num, option)| {
        let item = ItemRecord::new()
            .set_string("id", id)
            .set_string("name", name)
            .set_number("year", year)
            .set_number("num", num);
        match option {
            Some(option) => item.set_string("option", option),
            None => item,
        }
    }))
}

fn scan_test_data_0() -> FixtureSpec {
    FixtureSpec::new(
        TableSchema::new("ScanTestData0")
            .hash_key("id", AttributeType::String)
            .range_key("year", AttributeType::Number),
    )
    .with_item(
        ItemRecord::new()
            .set_string("id", "scanId0")
            .set_string("name", "scanAlice")
            .set_number("year", 2001)
            .set_number("num", 2000),
    )
}

fn project() -> FixtureSpec {
    FixtureSpec::new(
        TableSchema::new("Project")
            .hash_key("id", AttributeType::String)
            .attribute("orgId", AttributeType::String)
            .attribute("updatedAt", AttributeType::String)
            .secondary_index(
                SecondaryIndex::new("orgIndex")
                    .hash_key("orgId")
                    .range_key("updatedAt")
                    .projection(ProjectionMode::All),
            ),
    )
    .with_items((0..10).map(|i| {
        ItemRecord::new()
            .set_string("id", format!("id{}", i))
            .set_string("orgId", "myOrg")
            .set_string("updatedAt", "2019-03-11T00:00+0900")
    }))
}
