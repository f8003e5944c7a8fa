use crate::html;

/// HTML fragment listing a pin's downloadable files.
///
/// The fragment is inserted into the page as-is, so it is only built through
/// constructors that say where its markup came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PinFiles(String);

impl PinFiles {
    /// Links every file by its relative name, separated by commas.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fragment = String::new();
        for (i, name) in names.into_iter().enumerate() {
            if i > 0 {
                fragment.push_str(", ");
            }
            let name = html::escape(name.as_ref());
            fragment.push_str(&format!(r#"<a href="{0}">{0}</a>"#, name));
        }
        Self(fragment)
    }

    /// Uses markup the caller already rendered and trusts.
    pub fn trusted(fragment: impl Into<String>) -> Self {
        Self(fragment.into())
    }

    /// Uses markup from an untrusted source after cleaning it.
    pub fn sanitized(fragment: &str) -> Self {
        Self(ammonia::clean(fragment))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
