pub mod roles {

    pub const SUPER_ADMIN: &str = "superadmin";

    pub const USER: &str = "user";
}

pub mod usage {

    pub const GENERATION: &str = "generation";

    pub const REGENERATION: &str = "regeneration";
}

pub mod content_types {

    pub const BLOG: &str = "blog";

    pub const WEBSITE: &str = "website";
}
