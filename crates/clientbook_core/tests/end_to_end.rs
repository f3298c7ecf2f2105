use clientbook_core::{
    create_schema, drop_schema_if_exists, open_db_in_memory, with_unit_of_work, ClientPhoneRow,
    ClientQuery, ClientService, RepoError,
};

#[test]
fn vasya_lifecycle_from_create_to_delete() {
    let conn = open_db_in_memory().unwrap();
    create_schema(&conn).unwrap();
    let service = ClientService::sqlite(&conn);

    let id = service
        .create_client("Vasya", "Pupkin", "vasyap@ya.ru", &[79_999_999_999])
        .unwrap();

    let rows = service
        .find_clients(&ClientQuery::by_phone(79_999_999_999))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].client_id, id);
    assert_eq!(rows[0].first_name, "Vasya");

    assert_eq!(service.delete_phone(79_999_999_999).unwrap(), 1);
    assert_eq!(service.delete_client(id).unwrap(), 1);

    assert!(service
        .find_clients(&ClientQuery::by_id(id))
        .unwrap()
        .is_empty());
}

#[test]
fn failed_unit_of_work_rolls_back_partial_client_create() {
    let mut conn = open_db_in_memory().unwrap();
    create_schema(&conn).unwrap();

    let result = with_unit_of_work(&mut conn, |tx| {
        ClientService::sqlite(tx).create_client(
            "Sanya",
            "Sanyich",
            "sasanya@mail.ru",
            &[79_999_999_997, 1],
        )
    });

    assert!(matches!(result, Err(RepoError::CheckConstraintViolation(_))));
    let rows = ClientService::sqlite(&conn)
        .find_clients(&ClientQuery::default())
        .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn separate_units_of_work_commit_independently() {
    let mut conn = open_db_in_memory().unwrap();
    with_unit_of_work(&mut conn, |tx| -> Result<(), RepoError> {
        drop_schema_if_exists(tx)?;
        create_schema(tx)?;
        Ok(())
    })
    .unwrap();

    let vasya = with_unit_of_work(&mut conn, |tx| {
        ClientService::sqlite(tx).create_client("Vasya", "Pupkin", "vasyap@ya.ru", &[])
    })
    .unwrap();

    let duplicate = with_unit_of_work(&mut conn, |tx| -> Result<i64, RepoError> {
        let service = ClientService::sqlite(tx);
        service.add_phone(79_999_999_999, vasya)?;
        service.create_client("Vasya", "Clone", "vasyap@ya.ru", &[])
    });
    assert!(matches!(duplicate, Err(RepoError::UniquenessViolation(_))));

    let service = ClientService::sqlite(&conn);
    assert!(service.get_client(vasya).unwrap().is_some());
    assert!(service.list_phones(vasya).unwrap().is_empty());
}

#[test]
fn sample_session_produces_expected_searches() {
    let mut conn = open_db_in_memory().unwrap();
    create_schema(&conn).unwrap();

    with_unit_of_work(&mut conn, |tx| -> Result<(), RepoError> {
        let service = ClientService::sqlite(tx);
        service.create_client("Ruslan", "Akhmarov", "ari@gmail.com", &[])?;
        service.create_client("Ruslan", "Imposter", "arimp@gmail.com", &[])?;
        service.create_client("Vasya", "Pupkin", "vasyap@ya.ru", &[79_999_999_999])?;
        service.create_client(
            "Sanya",
            "Sanyich",
            "sasanya@mail.ru",
            &[79_999_999_997, 79_999_999_998],
        )?;
        service.add_phone(79_999_999_991, 1)?;
        service.update_client(3, "Vanya", "Dupkin", "vanyad@ya.ru", None)?;
        service.delete_phone(79_999_999_999)?;
        service.delete_client(2)?;
        Ok(())
    })
    .unwrap();

    let service = ClientService::sqlite(&conn);
    let by_last_name = service
        .find_clients(&ClientQuery::default().last_name("Sanyich"))
        .unwrap();
    let phones: Vec<_> = by_last_name.iter().map(|row| row.phone).collect();
    assert_eq!(phones, vec![Some(79_999_999_997), Some(79_999_999_998)]);

    let by_phone = service
        .find_clients(&ClientQuery::by_phone(79_999_999_998))
        .unwrap();
    assert_eq!(by_phone.len(), 1);
    assert_eq!(by_phone[0].client_id, 4);

    let vanya = service.get_client(3).unwrap().unwrap();
    assert_eq!(vanya.first_name, "Vanya");
    assert!(vanya.phones.is_empty());
    assert!(service.get_client(2).unwrap().is_none());
}

#[test]
fn joined_rows_serialize_with_schema_column_names() {
    let row = ClientPhoneRow {
        client_id: 3,
        first_name: "Vasya".to_string(),
        last_name: "Pupkin".to_string(),
        email: "vasyap@ya.ru".to_string(),
        phone: None,
    };

    let json = serde_json::to_value(&row).unwrap();

    assert_eq!(json["client_id"], 3);
    assert_eq!(json["email"], "vasyap@ya.ru");
    assert!(json["phone"].is_null());
    assert_eq!(row.to_string(), "3 | Vasya | Pupkin | vasyap@ya.ru | -");
}
