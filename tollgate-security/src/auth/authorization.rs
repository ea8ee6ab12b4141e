//! Authorization Strategies
//!
//! Decide whether an actual permission satisfies a required one. Strategies
//! compose with [`AuthorizationStrategy::and`] and [`AuthorizationStrategy::or`]
//! without either side knowing about the other.

use super::identity::{Authentication, User};
use super::permissions::Permissions;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

pub trait AuthorizationStrategy<P: Permissions>: Send + Sync {
    fn authorize(&self, required: &P, actual: &P) -> bool;

    /// Authorize whoever is currently authenticated; nobody is always rejected
    fn authorize_current<U: User>(
        &self,
        required: &P,
        authentication: Option<&Authentication<U, P>>,
    ) -> bool
    where
        Self: Sized,
    {
        authentication
            .map(|authentication| self.authorize(required, &authentication.permissions))
            .unwrap_or(false)
    }

    fn and<S>(self, other: S) -> AndAuthorizationStrategy<Self, S>
    where
        Self: Sized,
        S: AuthorizationStrategy<P>,
    {
        AndAuthorizationStrategy::new(self, other)
    }

    fn or<S>(self, other: S) -> OrAuthorizationStrategy<Self, S>
    where
        Self: Sized,
        S: AuthorizationStrategy<P>,
    {
        OrAuthorizationStrategy::new(self, other)
    }
}

impl<P, S> AuthorizationStrategy<P> for Arc<S>
where
    P: Permissions,
    S: AuthorizationStrategy<P> + ?Sized,
{
    fn authorize(&self, required: &P, actual: &P) -> bool {
        (**self).authorize(required, actual)
    }
}

/// Delegates to `required.accept(actual)`
pub struct DefaultAuthorizationStrategy<P> {
    _permissions: PhantomData<fn() -> P>,
}

impl<P> DefaultAuthorizationStrategy<P> {
    pub fn new() -> Self {
        Self {
            _permissions: PhantomData,
        }
    }
}

impl<P> Default for DefaultAuthorizationStrategy<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for DefaultAuthorizationStrategy<P> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for DefaultAuthorizationStrategy<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultAuthorizationStrategy")
    }
}

impl<P: Permissions> AuthorizationStrategy<P> for DefaultAuthorizationStrategy<P> {
    fn authorize(&self, required: &P, actual: &P) -> bool {
        required.accept(actual)
    }
}

/// Authorizes only when both strategies do
#[derive(Debug, Clone)]
pub struct AndAuthorizationStrategy<A, B> {
    first: A,
    second: B,
}

impl<A, B> AndAuthorizationStrategy<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<P, A, B> AuthorizationStrategy<P> for AndAuthorizationStrategy<A, B>
where
    P: Permissions,
    A: AuthorizationStrategy<P>,
    B: AuthorizationStrategy<P>,
{
    fn authorize(&self, required: &P, actual: &P) -> bool {
        self.first.authorize(required, actual) && self.second.authorize(required, actual)
    }
}

/// Authorizes when either strategy does
#[derive(Debug, Clone)]
pub struct OrAuthorizationStrategy<A, B> {
    first: A,
    second: B,
}

impl<A, B> OrAuthorizationStrategy<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<P, A, B> AuthorizationStrategy<P> for OrAuthorizationStrategy<A, B>
where
    P: Permissions,
    A: AuthorizationStrategy<P>,
    B: AuthorizationStrategy<P>,
{
    fn authorize(&self, required: &P, actual: &P) -> bool {
        self.first.authorize(required, actual) || self.second.authorize(required, actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identity::DefaultUser;
    use crate::auth::permissions::{roles, Permission, RolePermissions};

    struct Fixed(bool);

    impl AuthorizationStrategy<RolePermissions> for Fixed {
        fn authorize(&self, _: &RolePermissions, _: &RolePermissions) -> bool {
            self.0
        }
    }

    fn role(name: &str, rank: i32) -> RolePermissions {
        RolePermissions::new(name, rank)
    }

    #[test]
    fn test_default_strategy_role_fixture() {
        let strategy = DefaultAuthorizationStrategy::new();
        let admin = role(roles::ADMIN, 0);
        let user = role(roles::USER, 2);

        assert!(strategy.authorize(&user, &admin));
        assert!(!strategy.authorize(&admin, &user));
        assert!(strategy.authorize(&user, &user));
    }

    #[test]
    fn test_and_truth_table() {
        let required = role(roles::USER, 2);
        let cases = [
            (false, false, false),
            (false, true, false),
            (true, false, false),
            (true, true, true),
        ];

        for (a, b, expected) in cases {
            let strategy = Fixed(a).and(Fixed(b));
            assert_eq!(strategy.authorize(&required, &required), expected, "{a} AND {b}");
        }
    }

    #[test]
    fn test_or_truth_table() {
        let required = role(roles::USER, 2);
        let cases = [
            (false, false, false),
            (false, true, true),
            (true, false, true),
            (true, true, true),
        ];

        for (a, b, expected) in cases {
            let strategy = Fixed(a).or(Fixed(b));
            assert_eq!(strategy.authorize(&required, &required), expected, "{a} OR {b}");
        }
    }

    #[test]
    fn test_combinators_nest() {
        let admin = role(roles::ADMIN, 0);
        let user = role(roles::USER, 2);

        let strict = DefaultAuthorizationStrategy::new().and(Fixed(false));
        assert!(!strict.authorize(&user, &admin));

        let lenient = strict.or(DefaultAuthorizationStrategy::new());
        assert!(lenient.authorize(&user, &admin));
        assert!(!lenient.authorize(&admin, &user));
    }

    #[test]
    fn test_shared_strategy() {
        let shared: Arc<dyn AuthorizationStrategy<RolePermissions>> =
            Arc::new(DefaultAuthorizationStrategy::new());
        assert!(shared.authorize(&role(roles::USER, 2), &role(roles::REVIEWER, 1)));
    }

    #[test]
    fn test_authorize_current_rejects_missing_authentication() {
        let strategy = DefaultAuthorizationStrategy::<Permission>::new();
        let required = Permission::role(roles::USER, 2);
        let authentication = Authentication::new(
            DefaultUser::new("Rita", "Reviewer", "rita@example.org"),
            Permission::role(roles::REVIEWER, 1),
        );

        assert!(strategy.authorize_current(&required, Some(&authentication)));
        assert!(!strategy.authorize_current::<DefaultUser>(&required, None));
        assert!(!strategy.authorize_current(
            &Permission::role(roles::ADMIN, 0),
            Some(&authentication)
        ));
    }
}
