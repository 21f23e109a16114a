//! Fixed option lists offered by the donation form.

/// One entry of a select widget: the submitted value and the shown label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl SelectOption {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

const ANIMALS: &[SelectOption] = &[
    SelectOption::new("Cheetahs", "Cheetahs"),
    SelectOption::new("Black Caimans", "Black Caimans"),
    SelectOption::new("Lion", "Lion"),
    SelectOption::new("Elephant", "Elephant"),
];

const ZOOS: &[SelectOption] = &[
    SelectOption::new("San Diego Zoo", "San Diego Zoo"),
    SelectOption::new("Memphis Zoo", "Memphis Zoo"),
    SelectOption::new("Safari Park", "Safari Park"),
    SelectOption::new("City Zoo", "City Zoo"),
];

const DONATION_AMOUNTS: &[SelectOption] = &[
    SelectOption::new("10", "$10"),
    SelectOption::new("20", "$20"),
    SelectOption::new("40", "$40"),
    SelectOption::new("50", "$50"),
    SelectOption::new("100", "$100"),
];

/// The three option lists, immutable for the lifetime of the page.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub animals: &'static [SelectOption],
    pub zoos: &'static [SelectOption],
    pub amounts: &'static [SelectOption],
}

impl Catalog {
    pub const fn standard() -> Self {
        Self {
            animals: ANIMALS,
            zoos: ZOOS,
            amounts: DONATION_AMOUNTS,
        }
    }

    pub fn options(&self, field: Field) -> &'static [SelectOption] {
        match field {
            Field::Animal => self.animals,
            Field::Zoo => self.zoos,
            Field::Amount => self.amounts,
        }
    }

    /// Find the option whose value matches exactly.
    pub fn lookup(&self, field: Field, value: &str) -> Option<&'static SelectOption> {
        self.options(field).iter().find(|opt| opt.value == value)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// The form fields backed by a catalog list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Animal,
    Zoo,
    Amount,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Animal => "Select Animal",
            Field::Zoo => "Select Zoo",
            Field::Amount => "Donation Amount",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
