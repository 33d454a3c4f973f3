//! Built-in roster used when no table is supplied.

/// Twenty-person team table using the Korean column headers.
pub const SAMPLE_ROSTER_CSV: &str = "\
이름,ldap,소속,직위,직군,탄생년도,입사년도,MBTI,혈액형,동기 여부,카카오분사,성별,워크샵 성향(2022),워크샵성향(2025),거주지,결혼여부,Image
김수형,cantabile.58,데이터분석랩,실장,개발,1970,2015,INTP,O,,카카오,남자,힐링,힐링,경기도,기혼,cantabile.png
김선영,party.92,BI셀,셀장,기술,1984,2016,ESFJ,A,,카카오,여자,힐링,힐링,경기도,기혼,party.png
송대섭,steven.song,BI셀,셀원,개발,1989,2018.1.22,ISTP,O,,,남자,힐링,힐링,경기도,미혼,steven.png
이나연,zoe.lee93,BI셀,셀원,개발,1993,2022.1.17,INFJ,A,,,여자,액티비티,힐링,서울,미혼,zoe.png
유선정,saylor.u,BI셀,셀원,기술,1994,2023.5.2,INFP,A,,,여자,,액티비티,경기도,미혼,saylor.png
조승민,noah.94,BI셀,셀원,기술,1994,2024.10.28,ESFJ,A,2024 경력직 동기,,남자,,액티비티,경기도,기혼,noah.png
김용환,feno.meno,BI셀,셀원,개발,1994,2024.11.18,INFP,AB,2024 경력직 동기,,남자,,액티비티,서울,미혼,feno.png
강동진,sonny.kang,BI셀,셀원,기술,1995,2021.6.23,ESFP,A,2021 인턴 동기,,남자,액티비티,액티비티,서울,미혼,sonny.png
조윤영,zoey.cho,BI셀,셀원,개발,1996,2021.6.23,INTJ,B,2021 인턴 동기,,여자,액티비티,힐링,서울,기혼,zoey.png
조은희,alysia.c,데이터테크셀,셀장,개발,1980,2017,ISTP,A,,카카오,여자,힐링,액티비티,서울,기혼,alysia.png
정동주,dj.jeong,데이터테크셀,셀원,개발,1988,2017.3.20,ISFP,AB,,,여자,힐링,액티비티,서울,기혼,dj.png
윤태식,levi.y,데이터테크셀,셀원,개발,1992,2020.12.22,ENTJ,B,,,남자,액티비티,액티비티,서울,기혼,levi.png
이창욱,carl.lee,데이터테크셀,셀원,개발,1993,2021.11.30,INTP,B,2021 공채 동기,,남자,힐링,액티비티,경기도,미혼,carl.png
김범준,breadly.abc,데이터테크셀,셀원,개발,1994,2024.11.18,ISFJ,O,2024 경력직 동기,,남자,,액티비티,서울,기혼,breadly.png
김희원,wonnie.kim,데이터테크셀,셀원,개발,1997,2021.6.23,ENFP,B,2021 인턴 동기,,여자,액티비티,힐링,서울,미혼,wonnie.png
박종범,jaybe.park,이상탐지셀,셀장,개발,1990,2019,ESTP,A,,,남자,액티비티,액티비티,서울,기혼,jaybe.png
주철민,iron.min,이상탐지셀,셀원,개발,1988,2018.9.18,INFJ,B,,,남자,힐링,힐링,경기도,미혼,iron.png
김우영,walt.kim,이상탐지셀,셀원,개발,1990,2020.11.24,,O,,,남자,액티비티,힐링,경기도,미혼,walt.png
이종우,justin.dev,이상탐지셀,셀원,개발,1995,2021.11.17,INTJ,B,2021 공채 동기,,남자,힐링,힐링,경기도,미혼,justin.png
김혜정,molly.ouo,이상탐지셀,셀원,개발,1999,2023.1.16,ENFJ,B,,,여자,,힐링,서울,미혼,molly.png
";
