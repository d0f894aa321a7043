//! Display-name decoration.
//!
//! A report about roads reads better when its name says which class of road
//! is involved, so the most important `highway` value among the contributing
//! property blocks is appended to the name.

use geoflag_core::{HighwayClass, PropertyMap};

/// Property key of the document's display name.
pub const NAME_KEY: &str = "name";

/// Most important highway classification across `blocks`.
///
/// Blocks without a `highway` value, with an unrecognised value, or with
/// `highway=no` contribute nothing.
#[must_use]
pub fn feature_decorator<'b, I>(blocks: I) -> Option<HighwayClass>
where
    I: IntoIterator<Item = &'b PropertyMap>,
{
    blocks
        .into_iter()
        .filter_map(|block| block.get(HighwayClass::KEY))
        .filter_map(|value| match value.parse::<HighwayClass>() {
            Ok(class) => Some(class),
            Err(error) => {
                tracing::debug!(%error, "ignoring highway value in decorator");
                None
            }
        })
        .filter(|class| *class != HighwayClass::No)
        .max()
}

/// Append `(highway=<class>)` to the `name` in `context`, if `blocks` carry
/// a classification. A missing name is replaced by `default_name`.
pub fn decorate_name<'b, I>(context: &mut PropertyMap, blocks: I, default_name: &str)
where
    I: IntoIterator<Item = &'b PropertyMap>,
{
    if let Some(class) = feature_decorator(blocks) {
        let name = context
            .get(NAME_KEY)
            .map_or(default_name, String::as_str);
        let decorated = format!("{name} ({})", class.as_tag());
        context.insert(NAME_KEY.to_string(), decorated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn block(highway: Option<&str>) -> PropertyMap {
        let mut block = PropertyMap::from([("osmid".to_string(), "1".to_string())]);
        if let Some(value) = highway {
            block.insert("highway".to_string(), value.to_string());
        }
        block
    }

    #[rstest]
    #[case(&[Some("residential"), Some("motorway"), None], Some(HighwayClass::Motorway))]
    #[case(&[Some("service"), Some("primary_link")], Some(HighwayClass::PrimaryLink))]
    #[case(&[Some("FOOTWAY")], Some(HighwayClass::Footway))]
    #[case(&[None, None], None)]
    #[case(&[Some("no")], None)]
    #[case(&[Some("not-a-road"), Some("track")], Some(HighwayClass::Track))]
    #[case(&[], None)]
    fn picks_most_important(
        #[case] values: &[Option<&str>],
        #[case] expected: Option<HighwayClass>,
    ) {
        let blocks: Vec<_> = values.iter().map(|v| block(*v)).collect();
        assert_eq!(feature_decorator(&blocks), expected);
    }

    #[test]
    fn decorates_existing_name() {
        let mut context = PropertyMap::from([(NAME_KEY.to_string(), "SomeCheck".to_string())]);
        decorate_name(
            &mut context,
            &[block(Some("residential")), block(Some("motorway")), block(None)],
            "Task",
        );
        assert_eq!(context[NAME_KEY], "SomeCheck (highway=motorway)");
    }

    #[test]
    fn missing_name_uses_default() {
        let mut context = PropertyMap::new();
        decorate_name(&mut context, &[block(Some("trunk"))], "Task");
        assert_eq!(context[NAME_KEY], "Task (highway=trunk)");
    }

    #[test]
    fn no_classification_leaves_name_alone() {
        let mut context = PropertyMap::new();
        decorate_name(&mut context, &[block(None)], "Task");
        assert!(context.get(NAME_KEY).is_none());
    }
}
