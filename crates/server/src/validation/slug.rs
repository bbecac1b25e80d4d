use edit_workflow::slug::is_derived_form;

pub fn validate_slug(slug: &str) -> anyhow::Result<()> {
    if slug.is_empty() {
        return Err(anyhow::anyhow!("slug is required"));
    }

    if is_derived_form(slug) {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "slug may only contain lowercase letters, digits and underscores"
        ))
    }
}

pub fn validate_title(title: &str) -> anyhow::Result<()> {
    if title.trim().is_empty() {
        Err(anyhow::anyhow!("title is required"))
    } else {
        Ok(())
    }
}
