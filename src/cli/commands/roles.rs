use crate::auth::roles::ROLES;

pub fn handle() {
    for (role, permissions) in ROLES {
        println!("{}:", role);
        for permission in permissions.iter() {
            println!("  {}", permission);
        }
    }
}
