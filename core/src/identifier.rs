/// Identifier information for Updraft related to storing app data.
pub struct Identifier;

impl Identifier {
    pub fn qualifier() -> String {
        String::from("com")
    }

    pub fn organization() -> String {
        String::from("Updraft")
    }

    pub fn application() -> String {
        String::from("Updraft Administration")
    }
}

#[cfg(test)]
#[path = "./identifier_test.rs"]
mod identifier_test;
