use proptest::prelude::*;
use tablegen::{
    catalog::{Catalog, SqliteCatalog},
    emit::{TableImplementation, TableInterface},
    registry::DeclaredType,
    TableModel,
};

/// Column list and primary key position for a generated table.
fn table_strategy() -> impl Strategy<Value = (Vec<DeclaredType>, usize)> {
    prop::collection::vec(prop::sample::select(DeclaredType::ALL.to_vec()), 1..10)
        .prop_flat_map(|types| {
            let len = types.len();
            (Just(types), 0..len)
        })
}

fn build(types: &[DeclaredType], pk: usize) -> TableModel {
    let columns: Vec<String> = types
        .iter()
        .enumerate()
        .map(|(i, ty)| {
            if i == pk {
                format!("C{i} INTEGER PRIMARY KEY")
            } else {
                format!("C{i} {ty}")
            }
        })
        .collect();
    let sql = format!("CREATE TABLE T_V1({});", columns.join(", "));
    let catalog = SqliteCatalog::load(&sql).unwrap();
    let (name, definition) = catalog.list_tables().unwrap().remove(0);
    TableModel::build(&catalog, &name, &definition).unwrap()
}

/// Positions of `needles` in `haystack`, in needle order.
fn positions(haystack: &str, needles: &[String]) -> Vec<usize> {
    needles
        .iter()
        .map(|needle| haystack.find(needle.as_str()).unwrap())
        .collect()
}

fn is_sorted(values: &[usize]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

proptest! {
    #[test]
    fn insert_binds_primary_key_last((types, pk) in table_strategy()) {
        let model = build(&types, pk);
        let insert = &model.statements.insert;
        prop_assert_eq!(insert.placeholders(), types.len());
        let key = format!("C{pk}");
        prop_assert_eq!(insert.columns.last(), Some(&key));
        prop_assert_eq!(insert.to_string().matches('?').count(), types.len());

        let update = model.statements.update.to_string();
        let tail = format!("WHERE C{pk} = ?");
        prop_assert!(update.ends_with(&tail));
    }

    #[test]
    fn column_enumeration_puts_primary_key_first((types, pk) in table_strategy()) {
        let model = build(&types, pk);
        let text = TableInterface(&model).to_string();

        let mut expected = vec![format!("COL_ID_C{pk} = 0")];
        expected.extend(
            (0..types.len())
                .filter(|i| *i != pk)
                .map(|i| format!("COL_ID_C{i},")),
        );
        expected.push("COL_ID_size".to_string());
        prop_assert!(is_sorted(&positions(&text, &expected)));
        prop_assert_eq!(text.matches(": public TableOpV<").count(), types.len());
        prop_assert_eq!(text.matches("struct SorterBy").count(), types.len());
    }

    #[test]
    fn projections_follow_declaration_order((types, pk) in table_strategy()) {
        let model = build(&types, pk);
        let text = TableImplementation(&model).to_string();

        let keys: Vec<String> = (0..types.len())
            .map(|i| format!("json_writer.Key(\"C{i}\");"))
            .collect();
        prop_assert!(is_sorted(&positions(&text, &keys)));

        let reads: Vec<String> = (0..types.len())
            .map(|i| format!("    C{i} = q."))
            .collect();
        prop_assert!(is_sorted(&positions(&text, &reads)));

        let select: Vec<String> = (0..types.len()).map(|i| format!("C{i}")).collect();
        prop_assert_eq!(
            model.statements.select.to_string(),
            format!("SELECT {} FROM T_V1", select.join(", "))
        );
    }
}
