use model::RouteState;
use rand::{
    distr::{Alphanumeric, SampleString},
    seq::IndexedRandom,
    Rng,
};

use crate::{
    client::{AuthToken, TrackingClient},
    dto::{NewUser, NewVehicle, ResourceId, UserCredentials},
    ApiError,
};

const GIVEN_NAMES: &[&str] = &[
    "Anna", "Bo", "Carl", "Dorthe", "Emil", "Freja", "Gustav", "Ida", "Jonas", "Karen",
    "Lars", "Mette", "Niels", "Oskar", "Pernille", "Sofie",
];

const SURNAMES: &[&str] = &[
    "Andersen", "Christensen", "Hansen", "Jensen", "Johansen", "Larsen", "Madsen",
    "Nielsen", "Olsen", "Pedersen", "Poulsen", "Rasmussen", "Sørensen", "Thomsen",
];

const MAKES: &[&str] = &[
    "Audi", "Citroën", "Fiat", "Ford", "Mazda", "Opel", "Peugeot", "Renault", "Skoda",
    "Toyota", "Volkswagen", "Volvo",
];

const MODELS: &[&str] = &[
    "Astra", "Berlingo", "Corolla", "Fabia", "Focus", "Golf", "Octavia", "Panda", "Passat",
    "Polo", "Twingo", "V70", "Yaris",
];

fn pick<R: Rng + ?Sized>(rng: &mut R, values: &[&'static str]) -> &'static str {
    values.choose(rng).copied().unwrap_or_default()
}

/// Appends the EAN-13 check digit to 12 digits.
fn ean13(digits: [u8; 12]) -> String {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(index, digit)| u32::from(*digit) * if index % 2 == 0 { 1 } else { 3 })
        .sum();
    let check = (10 - sum % 10) % 10;
    digits
        .iter()
        .map(|digit| char::from(b'0' + digit))
        .chain(char::from_digit(check, 10))
        .collect()
}

pub fn fake_user<R: Rng + ?Sized>(rng: &mut R) -> NewUser {
    let givenname = pick(rng, GIVEN_NAMES);
    let surname = pick(rng, SURNAMES);
    NewUser {
        username: format!(
            "{}{}{}",
            givenname.to_lowercase(),
            surname.chars().next().unwrap_or('x').to_lowercase(),
            rng.random_range(10..10_000)
        ),
        givenname: givenname.to_owned(),
        surname: surname.to_owned(),
        password: Alphanumeric.sample_string(rng, 12),
    }
}

pub fn fake_vehicle<R: Rng + ?Sized>(rng: &mut R) -> NewVehicle {
    let mut digits = [0u8; 12];
    for digit in digits.iter_mut() {
        *digit = rng.random_range(0..10);
    }
    NewVehicle {
        make: pick(rng, MAKES).to_owned(),
        model: pick(rng, MODELS).to_owned(),
        vintage: rng.random_range(1970..=2016),
        vin: ean13(digits),
    }
}

/// Everything the replay needs to report to the tracking service.
#[derive(Debug, Clone)]
pub struct Provisioned {
    pub user: UserCredentials,
    pub token: AuthToken,
    pub vehicle_id: ResourceId,
    pub route_id: ResourceId,
}

/// Prepares a route to report to.
///
/// Without `user` a new one is created with the `superuser` account. The user
/// is authenticated, gets a new vehicle, and a route in state CREATED is
/// created for that vehicle.
pub async fn provision<R: Rng + ?Sized>(
    client: &TrackingClient,
    superuser: &UserCredentials,
    user: Option<UserCredentials>,
    rng: &mut R,
) -> Result<Provisioned, ApiError> {
    let user = match user {
        Some(user) => user,
        None => {
            let superuser_token = client.authenticate(superuser).await?;
            let new_user = fake_user(rng);
            let created = client.create_user(&superuser_token, &new_user).await?;
            UserCredentials::new(created.username, new_user.password)
        }
    };

    let token = client.authenticate(&user).await?;
    let vehicle = fake_vehicle(rng);
    let vehicle_id = client.create_vehicle(&token, &vehicle).await?;
    let route_id = client.create_route(&token, &vehicle_id).await?;
    log::debug!("route {} is {}", route_id, RouteState::Created);

    Ok(Provisioned {
        user,
        token,
        vehicle_id,
        route_id,
    })
}
