//! Pre-built Test Fixtures
//!
//! Fixed inputs keep assertions readable; the `random_*` variants use `fake`
//! for tests that create many rows and only care that they are valid.

use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;

use domain_catalog::{CustomerInput, ProductInput};

/// Fixture for product inputs
pub struct ProductFixtures;

impl ProductFixtures {
    /// A product with ten units in stock
    pub fn tea() -> ProductInput {
        ProductInput::new("Green tea", "Loose leaf sencha", 450, 10)
    }

    pub fn coffee() -> ProductInput {
        ProductInput::new("Espresso beans", "Dark roast arabica", 2190, 10)
    }

    /// A valid product with random text and amounts
    pub fn random() -> ProductInput {
        let name: String = Word().fake();
        let description: String = Sentence(3..8).fake();
        ProductInput::new(name, description, (1..100_000).fake::<i32>(), (1..1_000).fake::<i32>())
    }
}

/// Fixture for customer inputs
pub struct CustomerFixtures;

impl CustomerFixtures {
    pub fn ada() -> CustomerInput {
        CustomerInput::new("Ada", "Lovelace")
    }

    pub fn alan() -> CustomerInput {
        CustomerInput::new("Alan", "Turing")
    }

    /// A valid customer with random names
    pub fn random() -> CustomerInput {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        CustomerInput::new(first, last)
    }
}
